//! __conicdual__ builds the dual of a conic program for an external interior
//! point solver, and maps the solved dual quantities back onto the primal.
//!
//! The primal programs handled here have the form
//!
//! $$
//! \begin{array}{rl}
//! \text{minimize} & c^T x\\\\\[2ex\]
//!  \text{subject to} & Ax = b \\\\\[1ex\]
//!         & x \in \mathcal{K}
//!  \end{array}
//! $$
//!
//! where $\mathcal{K}$ is a product of nonnegative orthant cones.  Every
//! constraint receives a multiplier in the dual program.  A multiplier is
//! sign constrained when its constraint has a slack variable, and is otherwise
//! embedded as the inner coordinate of a 2-dimensional second-order cone.
//!
//! ## Usage
//!
//! * Build a primal [`ConicProgram`](program::ConicProgram).
//! * Wrap it in a [`Dualizer`](dualizer::Dualizer) and call
//!   [`check_out_program`](dualizer::Dualizer::check_out_program).
//! * Solve the dual program, e.g. through its
//!   [standard form](program::ConicProgram::to_standard_form), and store the
//!   solution with [`apply_solution`](program::StandardForm::apply_solution).
//! * Call [`check_in_program`](dualizer::Dualizer::check_in_program) to write
//!   the primal solution.
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod algebra;
pub mod dualizer;
pub mod io;
pub mod program;
