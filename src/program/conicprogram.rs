use super::*;
use crate::algebra::*;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A conic program
///
/// ```text
/// minimize    Σ cᵥ·xᵥ
/// subject to  Σ aᵢᵥ·xᵥ = bᵢ   for each linear constraint i
///             x_K ∈ K         for each cone K
/// ```
///
/// Variables, cones and constraints live in arenas and are referred to by
/// the handles [`VariableId`], [`ConeId`] and [`ConstraintId`].  Variables
/// are only ever created together with the cone that owns them.
///
/// The program also carries a flat solution vector `x` with one entry per
/// variable, together with the Lagrange multipliers of its constraints and
/// the dual values of its variables, all of which are populated by whatever
/// solves the program.
///
/// __Example usage__ : the program `min 3·x₂  s.t.  x₁ + 2·x₂ = 5,  x₁, x₂ ≥ 0`
///
/// ```
/// use conicdual::program::*;
///
/// let mut program = ConicProgram::<f64>::new();
/// let k1 = program.create_nonnegative_orthant_cone();
/// let k2 = program.create_nonnegative_orthant_cone();
/// let x1 = program.cone(k1).variables()[0];
/// let x2 = program.cone(k2).variables()[0];
/// program.set_objective_coefficient(x2, 3.0);
///
/// let con = program.create_constraint();
/// program.add_term(con, x1, 1.0).unwrap();
/// program.add_term(con, x2, 2.0).unwrap();
/// program.set_constrained_value(con, 5.0);
///
/// assert_eq!(program.num_variables(), 2);
/// assert_eq!(program.constraint(con).len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct ConicProgram<T: FloatT = f64> {
    variables: Vec<Variable<T>>,
    cones: Vec<Cone>,
    constraints: Vec<LinearConstraint<T>>,
    x: Vec<T>,
}

impl<T> Default for ConicProgram<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ConicProgram<T>
where
    T: FloatT,
{
    /// Create an empty program
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            cones: Vec::new(),
            constraints: Vec::new(),
            x: Vec::new(),
        }
    }

    // ---------------------------------------------------------
    // construction
    // ---------------------------------------------------------

    fn push_variable(&mut self, cone: ConeId) -> VariableId {
        let id = VariableId(self.variables.len());
        self.variables.push(Variable::new(cone, T::zero()));
        self.x.push(T::zero());
        id
    }

    /// Create a nonnegative orthant cone together with its single member variable.
    pub fn create_nonnegative_orthant_cone(&mut self) -> ConeId {
        let cone = ConeId(self.cones.len());
        let variable = self.push_variable(cone);
        self.cones.push(Cone::NonnegativeOrthant { variable });
        cone
    }

    /// Create a second-order cone with `n` member variables.  The first
    /// member is the cone's inner (apex) variable.
    pub fn create_second_order_cone(&mut self, n: usize) -> Result<ConeId, ProgramError> {
        if n < 2 {
            return Err(ProgramError::ConeDimension(n));
        }
        let cone = ConeId(self.cones.len());
        let variables = (0..n).map(|_| self.push_variable(cone)).collect();
        self.cones.push(Cone::SecondOrder { variables });
        Ok(cone)
    }

    /// Create an empty linear constraint with right-hand side zero.
    pub fn create_constraint(&mut self) -> ConstraintId {
        let id = ConstraintId(self.constraints.len());
        self.constraints.push(LinearConstraint::new(T::zero()));
        id
    }

    /// Add the term `coeff·var` to constraint `con`.
    pub fn add_term(
        &mut self,
        con: ConstraintId,
        var: VariableId,
        coeff: T,
    ) -> Result<(), ProgramError> {
        let terms = &mut self.constraints[con.0].terms;
        if terms.contains_key(&var) {
            return Err(ProgramError::DuplicateTerm { con, var });
        }
        terms.insert(var, coeff);
        self.variables[var.0].constraints.push(con);
        Ok(())
    }

    /// Remove the term of `var` from constraint `con`, returning its coefficient.
    pub fn remove_term(&mut self, con: ConstraintId, var: VariableId) -> Result<T, ProgramError> {
        let coeff = self.constraints[con.0]
            .terms
            .shift_remove(&var)
            .ok_or(ProgramError::MissingTerm { con, var })?;
        self.variables[var.0].constraints.retain(|&c| c != con);
        Ok(coeff)
    }

    // ---------------------------------------------------------
    // element access
    // ---------------------------------------------------------

    pub fn variable(&self, var: VariableId) -> &Variable<T> {
        &self.variables[var.0]
    }

    pub fn cone(&self, cone: ConeId) -> &Cone {
        &self.cones[cone.0]
    }

    pub fn constraint(&self, con: ConstraintId) -> &LinearConstraint<T> {
        &self.constraints[con.0]
    }

    /// the cone owning variable `var`
    pub fn cone_of(&self, var: VariableId) -> &Cone {
        self.cone(self.variables[var.0].cone)
    }

    pub fn objective_coefficient(&self, var: VariableId) -> T {
        self.variables[var.0].objective_coefficient
    }

    pub fn set_objective_coefficient(&mut self, var: VariableId, value: T) {
        self.variables[var.0].objective_coefficient = value;
    }

    pub fn dual_value(&self, var: VariableId) -> T {
        self.variables[var.0].dual_value
    }

    pub fn set_dual_value(&mut self, var: VariableId, value: T) {
        self.variables[var.0].dual_value = value;
    }

    pub fn constrained_value(&self, con: ConstraintId) -> T {
        self.constraints[con.0].constrained_value
    }

    pub fn set_constrained_value(&mut self, con: ConstraintId, value: T) {
        self.constraints[con.0].constrained_value = value;
    }

    pub fn lagrange(&self, con: ConstraintId) -> T {
        self.constraints[con.0].lagrange
    }

    pub fn set_lagrange(&mut self, con: ConstraintId, value: T) {
        self.constraints[con.0].lagrange = value;
    }

    /// Position of `var` in the solution vector
    pub fn index(&self, var: VariableId) -> usize {
        debug_assert!(var.0 < self.variables.len());
        var.0
    }

    /// solution vector, indexed by [`ConicProgram::index`]
    pub fn x(&self) -> &[T] {
        &self.x
    }

    pub fn x_mut(&mut self) -> &mut [T] {
        &mut self.x
    }

    // ---------------------------------------------------------
    // iteration and counts
    // ---------------------------------------------------------

    pub fn variable_ids(&self) -> impl Iterator<Item = VariableId> {
        (0..self.variables.len()).map(VariableId)
    }

    pub fn cone_ids(&self) -> impl Iterator<Item = ConeId> {
        (0..self.cones.len()).map(ConeId)
    }

    pub fn constraint_ids(&self) -> impl Iterator<Item = ConstraintId> {
        (0..self.constraints.len()).map(ConstraintId)
    }

    /// member variables of all nonnegative orthant cones, in cone order
    pub fn nonnegative_orthant_variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.cones.iter().filter_map(|cone| match cone {
            Cone::NonnegativeOrthant { variable } => Some(*variable),
            Cone::SecondOrder { .. } => None,
        })
    }

    /// Distinct cone types present, in order of first appearance
    pub fn cone_types(&self) -> Vec<ConeType> {
        let mut types = Vec::new();
        for t in self.cones.iter().map(Cone::cone_type) {
            if !types.contains(&t) {
                types.push(t);
            }
        }
        types
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_cones(&self) -> usize {
        self.cones.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// number of (variable, coefficient) terms over all constraints
    pub fn num_terms(&self) -> usize {
        self.constraints.iter().map(LinearConstraint::len).sum()
    }

    /// Check that cone ownership and constraint membership records agree
    /// with each other.  Programs built through the construction methods
    /// always pass; programs assembled elsewhere (e.g. deserialized) might not.
    pub fn check_consistency(&self) -> Result<(), ProgramError> {
        let nvars = self.variables.len();
        if self.x.len() != nvars {
            return Err(ProgramError::SolutionDimension {
                expected: nvars,
                found: self.x.len(),
            });
        }

        for (k, cone) in self.cones.iter().enumerate() {
            if let Cone::SecondOrder { variables } = cone {
                if variables.len() < 2 {
                    return Err(ProgramError::ConeDimension(variables.len()));
                }
            }
            let owned = |v: &VariableId| v.0 < nvars && self.variables[v.0].cone.0 == k;
            if !cone.variables().iter().all(owned) {
                return Err(ProgramError::InconsistentCone { cone: ConeId(k) });
            }
        }

        let mut counts = vec![0usize; nvars];
        for con in self.constraints.iter() {
            for var in con.variables() {
                match counts.get_mut(var.0) {
                    Some(count) => *count += 1,
                    None => return Err(ProgramError::InconsistentVariable { var }),
                }
            }
        }

        for (i, variable) in self.variables.iter().enumerate() {
            let var = VariableId(i);
            let cone_ok = self
                .cones
                .get(variable.cone.0)
                .is_some_and(|cone| cone.variables().contains(&var));

            let mut listed = variable.constraints.clone();
            listed.sort();
            listed.dedup();
            let constraints_ok = listed.len() == variable.constraints.len()
                && listed.len() == counts[i]
                && listed
                    .iter()
                    .all(|c| self.constraints.get(c.0).is_some_and(|con| con.contains(var)));

            if !(cone_ok && constraints_ok) {
                return Err(ProgramError::InconsistentVariable { var });
            }
        }
        Ok(())
    }

    // ---------------------------------------------------------
    // solution inspection
    // ---------------------------------------------------------

    /// Objective value `Σ cᵥ·xᵥ` at the current solution vector
    pub fn objective_value(&self) -> T {
        let c: Vec<T> = self
            .variables
            .iter()
            .map(|v| v.objective_coefficient)
            .collect();
        c.dot(&self.x)
    }

    /// Dual objective value `Σ bᵢ·λᵢ` at the current Lagrange multipliers
    pub fn dual_objective_value(&self) -> T {
        self.constraints
            .iter()
            .fold(T::zero(), |acc, con| acc + con.constrained_value * con.lagrange)
    }

    /// Largest absolute residual `|Σ aᵢᵥ·xᵥ − bᵢ|` over all constraints
    /// at the current solution vector.  Zero for a program without constraints.
    pub fn max_constraint_violation(&self) -> T {
        let residuals: Vec<T> = self
            .constraints
            .iter()
            .map(|con| {
                con.terms
                    .iter()
                    .fold(-con.constrained_value, |acc, (v, &a)| acc + a * self.x[v.0])
            })
            .collect();
        residuals.norm_inf()
    }

    /// Largest violation of cone membership at the current solution vector,
    /// i.e. the smallest `tol` for which every cone contains its coordinates.
    pub fn max_cone_violation(&self) -> T {
        self.cones
            .iter()
            .map(|cone| {
                let x: Vec<T> = cone.variables().iter().map(|v| self.x[v.0]).collect();
                match cone {
                    Cone::NonnegativeOrthant { .. } => T::max(T::zero(), -x[0]),
                    Cone::SecondOrder { .. } => {
                        let norm = x[1..].iter().fold(T::zero(), |acc, &v| acc + v * v).sqrt();
                        T::max(T::zero(), norm - x[0])
                    }
                }
            })
            .fold(T::zero(), T::max)
    }
}
