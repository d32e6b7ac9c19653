use crate::algebra::*;
use derive_builder::Builder;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Policy for choosing a slack when several variables of one constraint
/// qualify.  Candidates are considered in the constraint's term order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SlackSelection {
    /// the first qualifying term
    #[default]
    First,
    /// the last qualifying term
    Last,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned by settings validation
pub enum SettingsError {
    /// An error attributable to one of the fields
    #[error("Bad value for field \"{0}\"")]
    BadFieldValue(&'static str),
}

/// Settings for the [`Dualizer`](crate::dualizer::Dualizer)

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DualizerSettings<T: FloatT> {
    ///print a summary after every checkout
    #[builder(default = "false")]
    pub verbose: bool,

    ///which slack to use when a constraint has several candidates
    #[builder(default = "SlackSelection::First")]
    pub slack_selection: SlackSelection,

    ///reject primal programs with unsupported cone types at checkout
    #[builder(default = "true")]
    pub check_cone_support: bool,

    ///slack coefficients within this distance of 1 are not rescaled
    #[builder(default = "T::zero()")]
    pub unit_coefficient_tolerance: T,
}

impl<T> Default for DualizerSettings<T>
where
    T: FloatT,
{
    fn default() -> DualizerSettings<T> {
        DualizerSettingsBuilder::<T>::default().build().unwrap()
    }
}

impl<T> DualizerSettings<T>
where
    T: FloatT,
{
    /// Checks that the settings are valid.
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_unit_coefficient_tolerance(self.unit_coefficient_tolerance)
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<SettingsError> for DualizerSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        DualizerSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> DualizerSettingsBuilder<T>
where
    T: FloatT,
{
    /// check that any specified numerical values are valid
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(tol) = self.unit_coefficient_tolerance {
            validate_unit_coefficient_tolerance(tol)?;
        }
        Ok(())
    }
}

fn validate_unit_coefficient_tolerance<T: FloatT>(tol: T) -> Result<(), SettingsError> {
    if tol.is_finite() && tol >= T::zero() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue("unit_coefficient_tolerance"))
    }
}

#[test]
fn test_settings_validate() {
    let settings = DualizerSettings::<f64>::default();
    assert!(!settings.verbose);
    assert!(settings.check_cone_support);
    assert_eq!(settings.slack_selection, SlackSelection::First);
    assert_eq!(settings.unit_coefficient_tolerance, 0.0);
    assert!(settings.validate().is_ok());

    // builder rejects a negative tolerance
    assert!(DualizerSettingsBuilder::<f64>::default()
        .unit_coefficient_tolerance(-1e-9)
        .build()
        .is_err());

    // builder rejects a non-finite tolerance
    assert!(DualizerSettingsBuilder::<f64>::default()
        .unit_coefficient_tolerance(f64::NAN)
        .build()
        .is_err());

    // direct modification is caught by validate
    let mut settings = DualizerSettings::<f64>::default();
    settings.unit_coefficient_tolerance = f64::INFINITY;
    assert_eq!(
        settings.validate(),
        Err(SettingsError::BadFieldValue("unit_coefficient_tolerance"))
    );
}
