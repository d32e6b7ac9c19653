use super::VariableId;
use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A linear equality constraint `Σ aᵥ·xᵥ = b`.
///
/// Terms are kept in insertion order, so iteration over a constraint is
/// deterministic.  Each variable appears at most once.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct LinearConstraint<T> {
    #[cfg_attr(feature = "serde", serde(with = "indexmap::map::serde_seq"))]
    pub(crate) terms: IndexMap<VariableId, T>,
    pub(crate) constrained_value: T,
    pub(crate) lagrange: T,
}

impl<T: Copy> LinearConstraint<T> {
    pub(crate) fn new(zero: T) -> Self {
        Self {
            terms: IndexMap::new(),
            constrained_value: zero,
            lagrange: zero,
        }
    }

    /// (variable, coefficient) pairs in insertion order
    pub fn terms(&self) -> impl Iterator<Item = (VariableId, T)> + '_ {
        self.terms.iter().map(|(&v, &a)| (v, a))
    }

    /// variables of this constraint in insertion order
    pub fn variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.terms.keys().copied()
    }

    pub fn coefficient(&self, var: VariableId) -> Option<T> {
        self.terms.get(&var).copied()
    }

    pub fn contains(&self, var: VariableId) -> bool {
        self.terms.contains_key(&var)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// right-hand side `b`
    pub fn constrained_value(&self) -> T {
        self.constrained_value
    }

    /// Lagrange multiplier reported by a solver
    pub fn lagrange(&self) -> T {
        self.lagrange
    }
}
