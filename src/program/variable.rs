use super::{ConeId, ConstraintId};

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A scalar variable of a [`ConicProgram`](crate::program::ConicProgram).
///
/// Every variable is owned by exactly one cone and participates in zero
/// or more linear constraints.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct Variable<T> {
    pub(crate) cone: ConeId,
    pub(crate) objective_coefficient: T,
    pub(crate) dual_value: T,
    // constraints containing this variable, in the order terms were added
    pub(crate) constraints: Vec<ConstraintId>,
}

impl<T: Copy> Variable<T> {
    pub(crate) fn new(cone: ConeId, zero: T) -> Self {
        Self {
            cone,
            objective_coefficient: zero,
            dual_value: zero,
            constraints: Vec::new(),
        }
    }

    /// the cone owning this variable
    pub fn cone(&self) -> ConeId {
        self.cone
    }

    pub fn objective_coefficient(&self) -> T {
        self.objective_coefficient
    }

    /// dual value (reduced cost) reported by a solver
    pub fn dual_value(&self) -> T {
        self.dual_value
    }

    /// constraints in which this variable has a term
    pub fn constraints(&self) -> &[ConstraintId] {
        &self.constraints
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }
}
