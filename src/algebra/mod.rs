//! Numerical types and sparse matrix support used by conic programs.

mod csc;
mod error_types;
mod floats;
mod math_traits;
mod vecmath;

pub use csc::*;
pub use error_types::*;
pub use floats::*;
pub use math_traits::*;
