use super::SettingsError;
use crate::program::{ConeType, ProgramError};
use thiserror::Error;

/// Error type returned by the [`Dualizer`](crate::dualizer::Dualizer).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DualizerError {
    /// An operation requiring a checked out dual program was called while checked in
    #[error("Dual program is not checked out.")]
    NotCheckedOut,
    /// An operation requiring the checked in state was called while checked out
    #[error("Dual program is not checked in.")]
    NotCheckedIn,
    /// The primal program contains a cone type that cannot be dualized
    #[error("Primal program contains unsupported {0} cones")]
    UnsupportedConeType(ConeType),
    /// The primal program's structure is inconsistent
    #[error("Malformed primal program: {0}")]
    Program(#[from] ProgramError),
    /// Invalid settings
    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),
}

impl DualizerError {
    /// `true` for violations of the checkout / checkin protocol
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, DualizerError::NotCheckedOut | DualizerError::NotCheckedIn)
    }
}
