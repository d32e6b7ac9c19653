use super::{ConeId, ConstraintId, VariableId};
use crate::algebra::SparseFormatError;
use thiserror::Error;

/// Error type returned by structural operations on a [`ConicProgram`](crate::program::ConicProgram).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgramError {
    /// Second-order cones need at least two coordinates
    #[error("Second-order cone dimension {0} is smaller than 2")]
    ConeDimension(usize),
    /// The variable already has a term in the constraint
    #[error("Variable {var} already appears in constraint {con}")]
    DuplicateTerm { con: ConstraintId, var: VariableId },
    /// The variable has no term in the constraint
    #[error("Variable {var} does not appear in constraint {con}")]
    MissingTerm { con: ConstraintId, var: VariableId },
    /// A variable's recorded cone or constraint membership disagrees with
    /// the cones and constraints themselves
    #[error("Inconsistent membership records for variable {var}")]
    InconsistentVariable { var: VariableId },
    /// A cone refers to a variable that is not owned by it
    #[error("Inconsistent member list for cone {cone}")]
    InconsistentCone { cone: ConeId },
    /// A solution vector has the wrong length
    #[error("Solution vector has length {found}, expected {expected}")]
    SolutionDimension { expected: usize, found: usize },
    /// Sparse matrix assembly failed
    #[error(transparent)]
    SparseFormat(#[from] SparseFormatError),
}
