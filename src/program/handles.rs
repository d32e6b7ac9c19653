#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Handles are plain arena positions.  They carry no reference to the
// program that issued them, so it is not possible to verify that a
// handle is used with its originating program.

macro_rules! define_handle {
    ($(#[$doc:meta])* $name:ident, $label:literal) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub(crate) usize);

        impl $name {
            /// position of this handle in its program's arena
            pub fn index(&self) -> usize {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}{}", $label, self.0)
            }
        }
    };
}

define_handle!(
    /// Handle to a [`Variable`](crate::program::Variable) of a [`ConicProgram`](crate::program::ConicProgram)
    VariableId,
    "v"
);
define_handle!(
    /// Handle to a [`Cone`](crate::program::Cone) of a [`ConicProgram`](crate::program::ConicProgram)
    ConeId,
    "k"
);
define_handle!(
    /// Handle to a [`LinearConstraint`](crate::program::LinearConstraint) of a [`ConicProgram`](crate::program::ConicProgram)
    ConstraintId,
    "c"
);
