use super::*;
use crate::algebra::*;
use crate::program::*;
use std::time::Instant;

// cone types a primal program may contain
fn is_supported_cone_type(cone_type: ConeType) -> bool {
    match cone_type {
        ConeType::NonnegativeOrthant => true,
        ConeType::SecondOrder => false,
    }
}

/// `true` if every element of `cone_types` can appear in a primal program
/// passed to a [`Dualizer`].
pub fn supports_cone_types(cone_types: &[ConeType]) -> bool {
    cone_types.iter().all(|&t| is_supported_cone_type(t))
}

fn check_cone_support<T: FloatT>(primal: &ConicProgram<T>) -> Result<(), DualizerError> {
    match primal
        .cone_types()
        .into_iter()
        .find(|&t| !is_supported_cone_type(t))
    {
        Some(t) => Err(DualizerError::UnsupportedConeType(t)),
        None => Ok(()),
    }
}

/// Checkout state of a [`Dualizer`].
///
/// The dual program and its bookkeeping only exist while checked out.
#[derive(Clone, Debug, Default)]
pub enum DualizerState<T: FloatT = f64> {
    #[default]
    CheckedIn,
    CheckedOut(Box<CheckedOutProgram<T>>),
}

impl<T> DualizerState<T>
where
    T: FloatT,
{
    pub fn is_checked_out(&self) -> bool {
        matches!(self, DualizerState::CheckedOut(_))
    }
}

/// Transforms a primal [`ConicProgram`] into its dual and writes the solved
/// dual quantities back into the primal solution vector.
///
/// Each cycle is [`check_out_program`](Dualizer::check_out_program), an
/// external solve of the [dual program](Dualizer::dual_program_mut), then
/// [`check_in_program`](Dualizer::check_in_program).  Cycles may be repeated
/// any number of times on the same primal program.
///
/// The primal program may only contain
/// [supported cone types](supports_cone_types).
pub struct Dualizer<T: FloatT = f64> {
    primal: ConicProgram<T>,
    state: DualizerState<T>,

    /// settings used at every checkout
    pub settings: DualizerSettings<T>,
    /// summary of the most recent checkout
    pub info: DualizerInfo,
}

impl<T> Dualizer<T>
where
    T: FloatT,
{
    pub fn new(primal: ConicProgram<T>, settings: DualizerSettings<T>) -> Self {
        Self {
            primal,
            state: DualizerState::CheckedIn,
            settings,
            info: DualizerInfo::new(),
        }
    }

    /// Like [`new`](Dualizer::new), but first validates the settings, the
    /// structure of the primal program and its cone types.
    pub fn try_new(
        primal: ConicProgram<T>,
        settings: DualizerSettings<T>,
    ) -> Result<Self, DualizerError> {
        settings.validate()?;
        primal.check_consistency()?;
        check_cone_support(&primal)?;
        Ok(Self::new(primal, settings))
    }

    pub fn state(&self) -> &DualizerState<T> {
        &self.state
    }

    pub fn is_checked_out(&self) -> bool {
        self.state.is_checked_out()
    }

    /// Fails with [`DualizerError::NotCheckedOut`] unless checked out.
    pub fn verify_checked_out(&self) -> Result<(), DualizerError> {
        self.checked_out().map(|_| ())
    }

    /// Fails with [`DualizerError::NotCheckedIn`] if checked out.
    pub fn verify_checked_in(&self) -> Result<(), DualizerError> {
        match self.state {
            DualizerState::CheckedIn => Ok(()),
            DualizerState::CheckedOut(_) => Err(DualizerError::NotCheckedIn),
        }
    }

    /// The dual program and its bookkeeping.
    pub fn checked_out(&self) -> Result<&CheckedOutProgram<T>, DualizerError> {
        match &self.state {
            DualizerState::CheckedOut(checkout) => Ok(checkout),
            DualizerState::CheckedIn => Err(DualizerError::NotCheckedOut),
        }
    }

    fn checked_out_mut(&mut self) -> Result<&mut CheckedOutProgram<T>, DualizerError> {
        match &mut self.state {
            DualizerState::CheckedOut(checkout) => Ok(checkout),
            DualizerState::CheckedIn => Err(DualizerError::NotCheckedOut),
        }
    }

    /// Builds a new dual program from the primal program, discarding any
    /// previous one.  Nothing is modified on failure.
    pub fn check_out_program(&mut self) -> Result<&ConicProgram<T>, DualizerError> {
        self.verify_checked_in()?;
        let checkout = self.build_dual()?;
        self.state = DualizerState::CheckedOut(Box::new(checkout));
        self.dual_program()
    }

    /// Scoped alternative to [`check_out_program`](Dualizer::check_out_program).
    ///
    /// The returned guard borrows the dualizer exclusively, so no other
    /// operation can interleave with the cycle.  The solution only reaches
    /// the primal program through [`DualCheckout::check_in`]; dropping the
    /// guard discards the dual program.
    pub fn check_out(&mut self) -> Result<DualCheckout<'_, T>, DualizerError> {
        self.verify_checked_in()?;
        let checkout = self.build_dual()?;
        Ok(DualCheckout {
            checkout,
            dualizer: self,
        })
    }

    fn build_dual(&mut self) -> Result<CheckedOutProgram<T>, DualizerError> {
        self.settings.validate()?;
        if self.settings.check_cone_support {
            check_cone_support(&self.primal)?;
        }

        let start = Instant::now();
        let checkout = CheckedOutProgram::build(&self.primal, &self.settings)?;
        let elapsed = start.elapsed();

        let dual = checkout.dual_program();
        log::debug!(
            "checked out dual program: {} variables, {} constraints, {} cones",
            dual.num_variables(),
            dual.num_constraints(),
            dual.num_cones()
        );

        let info = &mut self.info;
        info.checkouts += 1;
        info.slack_multipliers = checkout.num_slack_multipliers();
        info.soc_multipliers = checkout.num_soc_multipliers();
        info.rescaled_slacks = checkout.num_rescaled_slacks();
        info.dual_variables = dual.num_variables();
        info.dual_constraints = dual.num_constraints();
        info.dual_cones = dual.num_cones();
        info.checkout_time = elapsed;

        if self.settings.verbose {
            let primal = (
                self.primal.num_variables(),
                self.primal.num_constraints(),
                self.primal.num_cones(),
            );
            if let Err(e) = self.info.print_checkout_summary(primal) {
                log::warn!("failed to print checkout summary: {e}");
            }
        }

        Ok(checkout)
    }

    /// The checked out dual program.
    pub fn dual_program(&self) -> Result<&ConicProgram<T>, DualizerError> {
        Ok(self.checked_out()?.dual_program())
    }

    /// The checked out dual program, for an external solver to populate
    /// with Lagrange multipliers and dual values.
    pub fn dual_program_mut(&mut self) -> Result<&mut ConicProgram<T>, DualizerError> {
        Ok(self.checked_out_mut()?.dual_program_mut())
    }

    /// Writes the solved dual quantities into the primal solution vector and
    /// returns to the checked in state.
    pub fn check_in_program(&mut self) -> Result<(), DualizerError> {
        self.verify_checked_out()?;
        if let DualizerState::CheckedOut(checkout) =
            std::mem::replace(&mut self.state, DualizerState::CheckedIn)
        {
            checkout.write_solution(&mut self.primal);
            self.info.checkins += 1;
            log::debug!("checked in dual program");
        }
        Ok(())
    }

    pub fn primal_program(&self) -> &ConicProgram<T> {
        &self.primal
    }

    /// The primal program, only while checked in.
    pub fn primal_program_mut(&mut self) -> Result<&mut ConicProgram<T>, DualizerError> {
        self.verify_checked_in()?;
        Ok(&mut self.primal)
    }

    pub fn into_primal_program(self) -> ConicProgram<T> {
        self.primal
    }

    // ---------------------------------------------
    // bookkeeping of the current checkout
    // ---------------------------------------------

    pub fn dual_constraint_of(
        &self,
        var: VariableId,
    ) -> Result<Option<ConstraintId>, DualizerError> {
        Ok(self.checked_out()?.dual_constraint_of(var))
    }

    pub fn slack_dual_variable_of(
        &self,
        var: VariableId,
    ) -> Result<Option<VariableId>, DualizerError> {
        Ok(self.checked_out()?.slack_dual_variable_of(var))
    }

    pub fn constraint_dual_variable(
        &self,
        con: ConstraintId,
    ) -> Result<Option<VariableId>, DualizerError> {
        Ok(self.checked_out()?.constraint_dual_variable(con))
    }

    pub fn soc_pair_of(
        &self,
        con: ConstraintId,
    ) -> Result<Option<SocVariablePair>, DualizerError> {
        Ok(self.checked_out()?.soc_pair_of(con))
    }

    pub fn multiplier_variable_of(
        &self,
        con: ConstraintId,
    ) -> Result<Option<VariableId>, DualizerError> {
        Ok(self.checked_out()?.multiplier_variable_of(con))
    }
}

/// A dual program checked out through [`Dualizer::check_out`].
pub struct DualCheckout<'a, T: FloatT = f64> {
    dualizer: &'a mut Dualizer<T>,
    checkout: CheckedOutProgram<T>,
}

impl<'a, T> DualCheckout<'a, T>
where
    T: FloatT,
{
    /// the primal program the dual was derived from
    pub fn primal_program(&self) -> &ConicProgram<T> {
        &self.dualizer.primal
    }

    /// Writes the solved dual quantities into the primal solution vector.
    pub fn check_in(self) {
        self.checkout.write_solution(&mut self.dualizer.primal);
        self.dualizer.info.checkins += 1;
        log::debug!("checked in dual program");
    }
}

impl<'a, T> std::ops::Deref for DualCheckout<'a, T>
where
    T: FloatT,
{
    type Target = CheckedOutProgram<T>;

    fn deref(&self) -> &Self::Target {
        &self.checkout
    }
}

impl<'a, T> std::ops::DerefMut for DualCheckout<'a, T>
where
    T: FloatT,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.checkout
    }
}

#[test]
fn test_supports_cone_types() {
    assert!(supports_cone_types(&[]));
    assert!(supports_cone_types(&[ConeType::NonnegativeOrthant]));
    assert!(!supports_cone_types(&[
        ConeType::NonnegativeOrthant,
        ConeType::SecondOrder
    ]));
}
