use super::VariableId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tag identifying the kind of a [`Cone`].
///
/// Adding a cone type here forces every exhaustive match on it,
/// including the dualizer's capability gate, to be revisited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConeType {
    /// The nonnegative half line `x ≥ 0`
    NonnegativeOrthant,
    /// The second-order cone `x₀ ≥ ‖(x₁,…,xₙ₋₁)‖₂`
    SecondOrder,
}

impl std::fmt::Display for ConeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConeType::NonnegativeOrthant => write!(f, "nonnegative orthant"),
            ConeType::SecondOrder => write!(f, "second-order"),
        }
    }
}

/// A cone owning the variables constrained to lie in it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Cone {
    /// Exactly one variable, constrained to be nonnegative
    NonnegativeOrthant { variable: VariableId },
    /// Two or more variables.  The first member is the apex ("inner")
    /// coordinate that dominates the Euclidean norm of the others.
    SecondOrder { variables: Vec<VariableId> },
}

impl Cone {
    pub fn cone_type(&self) -> ConeType {
        match self {
            Cone::NonnegativeOrthant { .. } => ConeType::NonnegativeOrthant,
            Cone::SecondOrder { .. } => ConeType::SecondOrder,
        }
    }

    /// member variables, in cone coordinate order
    pub fn variables(&self) -> &[VariableId] {
        match self {
            Cone::NonnegativeOrthant { variable } => std::slice::from_ref(variable),
            Cone::SecondOrder { variables } => variables,
        }
    }

    pub fn dim(&self) -> usize {
        self.variables().len()
    }

    /// The apex coordinate of a second-order cone.  `None` for
    /// nonnegative orthant cones.
    pub fn inner_variable(&self) -> Option<VariableId> {
        match self {
            Cone::NonnegativeOrthant { .. } => None,
            Cone::SecondOrder { variables } => variables.first().copied(),
        }
    }
}
