//! The primal-to-dual transformer.
//!
//! A [`Dualizer`] wraps one primal [`ConicProgram`](crate::program::ConicProgram)
//! with nonnegative orthant cones and linear equality constraints.  On
//! checkout it derives the dual program
//!
//! - one dual variable per primal constraint, carrying its multiplier.  The
//!   variable is nonnegative when the constraint has a slack (a variable
//!   appearing only in that constraint, in a nonnegative orthant cone, with
//!   zero objective coefficient) and is otherwise the inner variable of a
//!   2-dimensional second-order cone,
//! - one reduced cost constraint per non-slack nonnegative primal variable,
//!
//! and on checkin writes the solved multipliers and dual values back into
//! the primal solution vector.

mod checkout;
#[allow(clippy::module_inception)]
mod dualizer;
mod error;
mod info;
mod settings;

pub use checkout::*;
pub use dualizer::*;
pub use error::*;
pub use info::*;
pub use settings::*;
