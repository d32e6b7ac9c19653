#![allow(non_snake_case)]

use super::*;
use crate::algebra::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cone blocks of a [`StandardForm`] problem, in row order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SupportedConeT {
    /// The zero cone (used for equality constraints).
    ///
    /// The parameter indicates the cones dimension.
    ZeroConeT(usize),
    /// The nonnegative orthant.
    ///
    /// The parameter indicates the cones dimension.
    NonnegativeConeT(usize),
    /// The second order cone / Lorenz cone / ice-cream cone.
    ///
    /// The parameter indicates the cones dimension.
    SecondOrderConeT(usize),
}

impl SupportedConeT {
    /// number of rows covered by this cone block
    pub fn nvars(&self) -> usize {
        match self {
            SupportedConeT::ZeroConeT(dim) => *dim,
            SupportedConeT::NonnegativeConeT(dim) => *dim,
            SupportedConeT::SecondOrderConeT(dim) => *dim,
        }
    }
}

/// A conic program in the standard form used by interior point solvers
///
/// ```text
/// minimize    qᵀx
/// subject to  Ax + s = b
///             s ∈ K
/// ```
///
/// The first `ZeroConeT` block holds the program's linear constraints.
/// Every program cone contributes one further block of rows `−x_K + s = 0`,
/// with consecutive nonnegative orthant cones merged into a single block.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardForm<T: FloatT = f64> {
    /// linear cost vector, one entry per program variable
    pub q: Vec<T>,
    /// constraint matrix
    pub A: CscMatrix<T>,
    /// constraint right-hand side
    pub b: Vec<T>,
    /// cone blocks, in row order
    pub cones: Vec<SupportedConeT>,
    // program variable represented by each cone row (after the equality rows)
    cone_rows: Vec<VariableId>,
    // number of equality rows
    meq: usize,
}

impl<T> StandardForm<T>
where
    T: FloatT,
{
    /// Write a standard form solution back into `program`.
    ///
    /// `x` becomes the program's solution vector.  The equality block of
    /// the dual vector `z` gives the Lagrange multipliers `λ = −z_eq` and
    /// the cone blocks give the variables' dual values, so that the dual
    /// values equal the reduced costs `c − Aᵀλ`.
    pub fn apply_solution(
        &self,
        program: &mut ConicProgram<T>,
        x: &[T],
        z: &[T],
    ) -> Result<(), ProgramError> {
        let m = self.b.len();
        if x.len() != self.q.len() || program.num_variables() != self.q.len() {
            return Err(ProgramError::SolutionDimension {
                expected: self.q.len(),
                found: x.len(),
            });
        }
        if z.len() != m || program.num_constraints() != self.meq {
            return Err(ProgramError::SolutionDimension {
                expected: m,
                found: z.len(),
            });
        }

        program.x_mut().copy_from_slice(x);

        for (i, &zi) in z[..self.meq].iter().enumerate() {
            program.set_lagrange(ConstraintId(i), -zi);
        }
        for (&var, &zi) in self.cone_rows.iter().zip(&z[self.meq..]) {
            program.set_dual_value(var, zi);
        }
        Ok(())
    }
}

impl<T> ConicProgram<T>
where
    T: FloatT,
{
    /// Export this program in the [`StandardForm`] consumed by interior point solvers.
    pub fn to_standard_form(&self) -> Result<StandardForm<T>, ProgramError> {
        let n = self.num_variables();
        let meq = self.num_constraints();
        let m = meq + n;

        let q = self
            .variable_ids()
            .map(|v| self.objective_coefficient(v))
            .collect();

        let mut b = vec![T::zero(); m];
        let mut triplets = Vec::with_capacity(self.num_terms() + n);

        for con in self.constraint_ids() {
            let row = con.index();
            b[row] = self.constrained_value(con);
            for (var, a) in self.constraint(con).terms() {
                triplets.push((row, self.index(var), a));
            }
        }

        let mut cones = Vec::new();
        if meq > 0 {
            cones.push(SupportedConeT::ZeroConeT(meq));
        }

        let mut cone_rows = Vec::with_capacity(n);
        for cone in self.cone_ids().map(|k| self.cone(k)) {
            for &var in cone.variables() {
                triplets.push((meq + cone_rows.len(), self.index(var), -T::one()));
                cone_rows.push(var);
            }
            match (cone, cones.last_mut()) {
                (Cone::NonnegativeOrthant { .. }, Some(SupportedConeT::NonnegativeConeT(dim))) => {
                    *dim += 1;
                }
                (Cone::NonnegativeOrthant { .. }, _) => {
                    cones.push(SupportedConeT::NonnegativeConeT(1));
                }
                (Cone::SecondOrder { variables }, _) => {
                    cones.push(SupportedConeT::SecondOrderConeT(variables.len()));
                }
            }
        }

        let A = CscMatrix::new_from_triplets(m, n, triplets)?;

        Ok(StandardForm {
            q,
            A,
            b,
            cones,
            cone_rows,
            meq,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_form_blocks() {
        let mut program = ConicProgram::<f64>::new();
        let k1 = program.create_nonnegative_orthant_cone();
        let k2 = program.create_nonnegative_orthant_cone();
        let k3 = program.create_second_order_cone(2).unwrap();
        let x1 = program.cone(k1).variables()[0];
        let x2 = program.cone(k2).variables()[0];
        let t = program.cone(k3).inner_variable().unwrap();
        program.set_objective_coefficient(x2, 3.0);

        let con = program.create_constraint();
        program.add_term(con, x1, 1.0).unwrap();
        program.add_term(con, x2, 2.0).unwrap();
        program.add_term(con, t, -1.0).unwrap();
        program.set_constrained_value(con, 5.0);

        let sf = program.to_standard_form().unwrap();

        assert_eq!(sf.q, vec![0.0, 3.0, 0.0, 0.0]);
        assert_eq!(sf.b, vec![5.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(
            sf.cones,
            vec![
                SupportedConeT::ZeroConeT(1),
                SupportedConeT::NonnegativeConeT(2),
                SupportedConeT::SecondOrderConeT(2)
            ]
        );
        assert_eq!(sf.cones.iter().map(|c| c.nvars()).sum::<usize>(), sf.b.len());
        assert!(sf.A.check_format().is_ok());
        assert_eq!(sf.A.size(), (5, 4));
        assert_eq!(sf.A.nnz(), 7);
        assert_eq!(sf.A.get_entry((0, 1)), Some(2.0));
        assert_eq!(sf.A.get_entry((0, 2)), Some(-1.0));
        assert_eq!(sf.A.get_entry((3, 2)), Some(-1.0));
    }

    #[test]
    fn test_apply_solution() {
        // min 3·x₂  s.t.  x₁ + 2·x₂ = 5
        let mut program = ConicProgram::<f64>::new();
        let k1 = program.create_nonnegative_orthant_cone();
        let k2 = program.create_nonnegative_orthant_cone();
        let x1 = program.cone(k1).variables()[0];
        let x2 = program.cone(k2).variables()[0];
        program.set_objective_coefficient(x2, 3.0);
        let con = program.create_constraint();
        program.add_term(con, x1, 1.0).unwrap();
        program.add_term(con, x2, 2.0).unwrap();
        program.set_constrained_value(con, 5.0);

        let sf = program.to_standard_form().unwrap();

        // optimum x = (5, 0), λ = 0, reduced costs (0, 3)
        let x = [5.0, 0.0];

        // slacks s = b − Ax vanish on the equality rows
        let mut s = sf.b.clone();
        sf.A.gemv(&mut s, &x, -1.0, 1.0);
        assert_eq!(s, vec![0.0, 5.0, 0.0]);

        let z = [0.0, 0.0, 3.0];
        sf.apply_solution(&mut program, &x, &z).unwrap();

        assert_eq!(program.x(), &[5.0, 0.0]);
        assert_eq!(program.lagrange(con), 0.0);
        assert_eq!(program.dual_value(x1), 0.0);
        assert_eq!(program.dual_value(x2), 3.0);
        assert_eq!(program.max_constraint_violation(), 0.0);

        assert_eq!(
            sf.apply_solution(&mut program, &x, &z[..2]),
            Err(ProgramError::SolutionDimension {
                expected: 3,
                found: 2
            })
        );
    }
}
