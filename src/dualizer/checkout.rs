use super::*;
use crate::algebra::*;
use crate::program::*;

/// The second-order cone carrying the multiplier of a primal constraint
/// that has no slack, together with the cone's inner variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SocVariablePair {
    pub cone: ConeId,
    pub inner: VariableId,
}

/// A dual program together with the lookup tables relating it to the
/// primal program it was derived from.
///
/// All tables are indexed by primal handles and are only valid for the
/// primal program that produced them.
#[derive(Clone, Debug)]
pub struct CheckedOutProgram<T: FloatT = f64> {
    dual: ConicProgram<T>,

    // primal variable -> dual reduced cost constraint (non-slack variables)
    primal_vars_to_dual_cons: Vec<Option<ConstraintId>>,
    // primal slack variable -> dual variable of its constraint
    primal_vars_to_dual_vars: Vec<Option<VariableId>>,
    // primal constraint -> dual variable (slack case)
    primal_cons_to_dual_vars: Vec<Option<VariableId>>,
    // primal constraint -> second-order cone multiplier (no slack case)
    soc_pairs: Vec<Option<SocVariablePair>>,

    rescaled_slacks: usize,
}

fn is_slack<T: FloatT>(primal: &ConicProgram<T>, var: VariableId) -> bool {
    let variable = primal.variable(var);
    variable.num_constraints() == 1
        && matches!(primal.cone_of(var), Cone::NonnegativeOrthant { .. })
        && variable.objective_coefficient() == T::zero()
}

fn find_slack<T: FloatT>(
    primal: &ConicProgram<T>,
    con: ConstraintId,
    selection: SlackSelection,
) -> Option<VariableId> {
    let mut candidates = primal
        .constraint(con)
        .variables()
        .filter(|&v| is_slack(primal, v));

    match selection {
        SlackSelection::First => candidates.next(),
        SlackSelection::Last => candidates.last(),
    }
}

impl<T> CheckedOutProgram<T>
where
    T: FloatT,
{
    /// Derive the dual of `primal`.
    pub(crate) fn build(
        primal: &ConicProgram<T>,
        settings: &DualizerSettings<T>,
    ) -> Result<Self, ProgramError> {
        let nvars = primal.num_variables();
        let ncons = primal.num_constraints();

        let mut dual = ConicProgram::new();
        let mut primal_vars_to_dual_cons = vec![None; nvars];
        let mut primal_vars_to_dual_vars = vec![None; nvars];
        let mut primal_cons_to_dual_vars = vec![None; ncons];
        let mut soc_pairs = vec![None; ncons];

        // dual variable carrying the multiplier of each primal constraint
        let mut multipliers = Vec::with_capacity(ncons);

        for con in primal.constraint_ids() {
            let rhs = primal.constrained_value(con);

            let multiplier = match find_slack(primal, con, settings.slack_selection) {
                // the slack witnesses a sign constraint on the multiplier
                Some(slack) => {
                    let cone = dual.create_nonnegative_orthant_cone();
                    let d = dual.cone(cone).variables()[0];
                    dual.set_objective_coefficient(d, rhs);
                    primal_vars_to_dual_vars[slack.index()] = Some(d);
                    primal_cons_to_dual_vars[con.index()] = Some(d);
                    log::trace!("constraint {con}: slack {slack}, dual variable {d}");
                    d
                }
                // otherwise the multiplier is free in sign and is carried by
                // the inner coordinate of a 2-dimensional second-order cone
                None => {
                    let cone = dual.create_second_order_cone(2)?;
                    let inner = dual
                        .cone(cone)
                        .inner_variable()
                        .ok_or(ProgramError::InconsistentCone { cone })?;
                    dual.set_objective_coefficient(inner, rhs);
                    soc_pairs[con.index()] = Some(SocVariablePair { cone, inner });
                    log::trace!("constraint {con}: no slack, dual cone {cone}");
                    inner
                }
            };
            multipliers.push(multiplier);
        }

        // reduced cost constraint  Σ aᵢᵥ·yᵢ − wᵥ = −cᵥ,  wᵥ ≥ 0
        // for every nonnegative primal variable that is not a slack
        for var in primal.nonnegative_orthant_variables() {
            if primal_vars_to_dual_vars[var.index()].is_some() {
                continue;
            }
            let dc = dual.create_constraint();
            dual.set_constrained_value(dc, -primal.objective_coefficient(var));

            let cone = dual.create_nonnegative_orthant_cone();
            let w = dual.cone(cone).variables()[0];
            dual.add_term(dc, w, -T::one())?;
            dual.set_objective_coefficient(w, T::zero());

            primal_vars_to_dual_cons[var.index()] = Some(dc);
        }

        // transpose the primal constraint rows into the dual constraints
        for (con, &multiplier) in primal.constraint_ids().zip(&multipliers) {
            for (var, a) in primal.constraint(con).terms() {
                if let Some(dc) = primal_vars_to_dual_cons[var.index()] {
                    dual.add_term(dc, multiplier, a)?;
                }
            }
        }

        // rescale so that every slack enters its constraint with coefficient 1
        let mut rescaled_slacks = 0;
        for (i, d) in primal_vars_to_dual_vars.iter().enumerate() {
            let Some(d) = *d else { continue };
            let slack = VariableId(i);

            let k = primal
                .variable(slack)
                .constraints()
                .first()
                .and_then(|&con| primal.constraint(con).coefficient(slack))
                .ok_or(ProgramError::InconsistentVariable { var: slack })?;

            if T::abs(k - T::one()) <= settings.unit_coefficient_tolerance {
                continue;
            }
            if k == T::zero() {
                log::warn!("slack {slack} has a zero coefficient; dual program will not be finite");
            }

            dual.set_objective_coefficient(d, dual.objective_coefficient(d) / k);
            for dc in dual.variable(d).constraints().to_vec() {
                let scaled = dual.remove_term(dc, d)? / k;
                dual.add_term(dc, d, scaled)?;
            }
            log::trace!("slack {slack}: rescaled dual variable {d} by 1/{k}");
            rescaled_slacks += 1;
        }

        Ok(Self {
            dual,
            primal_vars_to_dual_cons,
            primal_vars_to_dual_vars,
            primal_cons_to_dual_vars,
            soc_pairs,
            rescaled_slacks,
        })
    }

    /// Copy the solved dual quantities into the solution vector of `primal`.
    pub(crate) fn write_solution(&self, primal: &mut ConicProgram<T>) {
        for (i, dc) in self.primal_vars_to_dual_cons.iter().enumerate() {
            if let Some(dc) = *dc {
                let idx = primal.index(VariableId(i));
                primal.x_mut()[idx] = self.dual.lagrange(dc);
            }
        }
        for (i, d) in self.primal_vars_to_dual_vars.iter().enumerate() {
            if let Some(d) = *d {
                let idx = primal.index(VariableId(i));
                primal.x_mut()[idx] = self.dual.dual_value(d);
            }
        }
    }

    /// the dual program
    pub fn dual_program(&self) -> &ConicProgram<T> {
        &self.dual
    }

    /// the dual program, e.g. for a solver to store its results in
    pub fn dual_program_mut(&mut self) -> &mut ConicProgram<T> {
        &mut self.dual
    }

    /// Dual constraint derived for the non-slack primal variable `var`
    pub fn dual_constraint_of(&self, var: VariableId) -> Option<ConstraintId> {
        self.primal_vars_to_dual_cons.get(var.index()).copied().flatten()
    }

    /// Dual variable derived for the primal slack variable `var`
    pub fn slack_dual_variable_of(&self, var: VariableId) -> Option<VariableId> {
        self.primal_vars_to_dual_vars.get(var.index()).copied().flatten()
    }

    /// Dual variable of primal constraint `con` when it has a slack
    pub fn constraint_dual_variable(&self, con: ConstraintId) -> Option<VariableId> {
        self.primal_cons_to_dual_vars.get(con.index()).copied().flatten()
    }

    /// Second-order cone multiplier of primal constraint `con` when it has no slack
    pub fn soc_pair_of(&self, con: ConstraintId) -> Option<SocVariablePair> {
        self.soc_pairs.get(con.index()).copied().flatten()
    }

    /// Dual variable carrying the multiplier of primal constraint `con`,
    /// whichever way it is represented
    pub fn multiplier_variable_of(&self, con: ConstraintId) -> Option<VariableId> {
        self.constraint_dual_variable(con)
            .or_else(|| self.soc_pair_of(con).map(|pair| pair.inner))
    }

    pub fn num_slack_multipliers(&self) -> usize {
        self.primal_cons_to_dual_vars.iter().flatten().count()
    }

    pub fn num_soc_multipliers(&self) -> usize {
        self.soc_pairs.iter().flatten().count()
    }

    /// number of slack dual variables rescaled for a non-unit coefficient
    pub fn num_rescaled_slacks(&self) -> usize {
        self.rescaled_slacks
    }
}
