//! Conic programs: linear objective, linear equality constraints and
//! variables grouped into cones.
//!
//! This module provides the program representation that the
//! [dualizer](crate::dualizer) consumes and produces, and an export to the
//! [`StandardForm`] used by interior point solvers.

mod cones;
mod conicprogram;
mod constraint;
mod error;
mod handles;
mod standard_form;
mod variable;

#[cfg(feature = "serde")]
mod json;

pub use cones::*;
pub use conicprogram::*;
pub use constraint::*;
pub use error::*;
pub use handles::*;
pub use standard_form::*;
pub use variable::*;
