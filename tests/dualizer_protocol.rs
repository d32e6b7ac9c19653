use conicdual::{dualizer::*, program::*};

// x1 + 2·x2 = 5, x1 a slack, objective 3·x2
fn basic_primal() -> (ConicProgram<f64>, VariableId, VariableId) {
    let mut primal = ConicProgram::new();
    let k1 = primal.create_nonnegative_orthant_cone();
    let k2 = primal.create_nonnegative_orthant_cone();
    let x1 = primal.cone(k1).variables()[0];
    let x2 = primal.cone(k2).variables()[0];
    primal.set_objective_coefficient(x2, 3.0);

    let con = primal.create_constraint();
    primal.add_term(con, x1, 1.0).unwrap();
    primal.add_term(con, x2, 2.0).unwrap();
    primal.set_constrained_value(con, 5.0);

    (primal, x1, x2)
}

fn basic_dualizer() -> Dualizer<f64> {
    let (primal, _, _) = basic_primal();
    Dualizer::new(primal, DualizerSettings::default())
}

#[test]
fn test_check_in_before_check_out() {
    let mut dualizer = basic_dualizer();

    assert!(!dualizer.is_checked_out());
    assert_eq!(dualizer.verify_checked_in(), Ok(()));
    assert_eq!(
        dualizer.verify_checked_out(),
        Err(DualizerError::NotCheckedOut)
    );

    let err = dualizer.check_in_program().unwrap_err();
    assert_eq!(err, DualizerError::NotCheckedOut);
    assert!(err.is_protocol_violation());

    assert!(matches!(
        dualizer.dual_program(),
        Err(DualizerError::NotCheckedOut)
    ));
    assert!(matches!(
        dualizer.dual_program_mut(),
        Err(DualizerError::NotCheckedOut)
    ));
    assert_eq!(dualizer.info.checkins, 0);
}

#[test]
fn test_double_check_out() {
    let mut dualizer = basic_dualizer();

    let first = dualizer.check_out_program().unwrap().clone();
    assert!(dualizer.is_checked_out());
    assert_eq!(dualizer.verify_checked_out(), Ok(()));
    assert_eq!(dualizer.verify_checked_in(), Err(DualizerError::NotCheckedIn));

    let err = dualizer.check_out_program().unwrap_err();
    assert_eq!(err, DualizerError::NotCheckedIn);
    assert!(err.is_protocol_violation());

    // the failed checkout leaves the current one untouched
    assert!(dualizer.is_checked_out());
    assert_eq!(dualizer.dual_program().unwrap(), &first);
    assert_eq!(dualizer.info.checkouts, 1);
}

#[test]
fn test_bookkeeping_requires_checkout() {
    let (primal, x1, x2) = basic_primal();
    let con = primal.constraint_ids().next().unwrap();
    let mut dualizer = Dualizer::new(primal, DualizerSettings::default());

    assert_eq!(
        dualizer.dual_constraint_of(x2),
        Err(DualizerError::NotCheckedOut)
    );
    assert_eq!(
        dualizer.slack_dual_variable_of(x1),
        Err(DualizerError::NotCheckedOut)
    );
    assert_eq!(
        dualizer.constraint_dual_variable(con),
        Err(DualizerError::NotCheckedOut)
    );
    assert_eq!(dualizer.soc_pair_of(con), Err(DualizerError::NotCheckedOut));
    assert_eq!(
        dualizer.multiplier_variable_of(con),
        Err(DualizerError::NotCheckedOut)
    );

    dualizer.check_out_program().unwrap();
    assert!(dualizer.dual_constraint_of(x2).unwrap().is_some());
    assert!(dualizer.slack_dual_variable_of(x1).unwrap().is_some());

    // the bookkeeping is gone again after checkin
    dualizer.check_in_program().unwrap();
    assert!(dualizer.checked_out().is_err());
    assert_eq!(
        dualizer.dual_constraint_of(x2),
        Err(DualizerError::NotCheckedOut)
    );
}

#[test]
fn test_primal_locked_while_checked_out() {
    let mut dualizer = basic_dualizer();
    assert!(dualizer.primal_program_mut().is_ok());

    dualizer.check_out_program().unwrap();
    assert!(matches!(
        dualizer.primal_program_mut(),
        Err(DualizerError::NotCheckedIn)
    ));
    assert_eq!(dualizer.primal_program().num_variables(), 2);

    dualizer.check_in_program().unwrap();
    assert!(dualizer.primal_program_mut().is_ok());
}

#[test]
fn test_repeated_cycles() {
    let mut dualizer = basic_dualizer();

    for _ in 0..3 {
        dualizer.check_out_program().unwrap();
        dualizer.check_in_program().unwrap();
    }
    assert_eq!(dualizer.info.checkouts, 3);
    assert_eq!(dualizer.info.checkins, 3);
    assert!(!dualizer.state().is_checked_out());

    let primal = dualizer.into_primal_program();
    assert_eq!(primal.num_constraints(), 1);
}

#[test]
fn test_scoped_checkout() {
    let (primal, x1, x2) = basic_primal();
    let mut dualizer = Dualizer::new(primal, DualizerSettings::default());

    // dropping the guard discards the dual program
    {
        let mut checkout = dualizer.check_out().unwrap();
        let d1 = checkout.slack_dual_variable_of(x1).unwrap();
        checkout.dual_program_mut().set_dual_value(d1, 5.0);
    }
    assert!(!dualizer.is_checked_out());
    assert_eq!(dualizer.primal_program().x(), &[0.0, 0.0]);

    let mut checkout = dualizer.check_out().unwrap();
    assert_eq!(checkout.primal_program().num_variables(), 2);
    let d1 = checkout.slack_dual_variable_of(x1).unwrap();
    let dc = checkout.dual_constraint_of(x2).unwrap();
    checkout.dual_program_mut().set_dual_value(d1, 5.0);
    checkout.dual_program_mut().set_lagrange(dc, 0.0);
    checkout.check_in();

    assert!(!dualizer.is_checked_out());
    assert_eq!(dualizer.primal_program().x(), &[5.0, 0.0]);
    assert_eq!(dualizer.info.checkouts, 2);
    assert_eq!(dualizer.info.checkins, 1);

    // the runtime protocol is still available afterwards
    dualizer.check_out_program().unwrap();
    assert!(matches!(
        dualizer.check_out(),
        Err(DualizerError::NotCheckedIn)
    ));
}

#[test]
fn test_cone_capability_gate() {
    assert!(supports_cone_types(&[ConeType::NonnegativeOrthant]));
    assert!(!supports_cone_types(&[
        ConeType::NonnegativeOrthant,
        ConeType::SecondOrder
    ]));
    assert!(!supports_cone_types(&[ConeType::SecondOrder]));
}

#[test]
fn test_unsupported_primal_cones() {
    let (mut primal, x1, x2) = basic_primal();
    let soc = primal.create_second_order_cone(3).unwrap();
    let apex = primal.cone(soc).variables()[0];
    let con = primal.constraint_ids().next().unwrap();
    primal.add_term(con, apex, 1.0).unwrap();

    assert_eq!(
        Dualizer::try_new(primal.clone(), DualizerSettings::default()).err(),
        Some(DualizerError::UnsupportedConeType(ConeType::SecondOrder))
    );

    // rejected at checkout, before anything changes
    let mut dualizer = Dualizer::new(primal.clone(), DualizerSettings::default());
    assert_eq!(
        dualizer.check_out_program().unwrap_err(),
        DualizerError::UnsupportedConeType(ConeType::SecondOrder)
    );
    assert!(!dualizer.is_checked_out());
    assert_eq!(dualizer.info.checkouts, 0);

    // with the gate disabled the second-order cone variables are skipped
    let settings = DualizerSettingsBuilder::default()
        .check_cone_support(false)
        .build()
        .unwrap();
    let mut dualizer = Dualizer::new(primal, settings);
    let dual = dualizer.check_out_program().unwrap();
    assert_eq!(dual.num_constraints(), 1);

    assert_eq!(dualizer.dual_constraint_of(apex), Ok(None));
    assert!(dualizer.dual_constraint_of(x2).unwrap().is_some());
    assert!(dualizer.slack_dual_variable_of(x1).unwrap().is_some());
}

#[test]
fn test_invalid_settings() {
    let (primal, _, _) = basic_primal();

    let mut settings = DualizerSettings::default();
    settings.unit_coefficient_tolerance = -1.0;
    let expected = DualizerError::Settings(SettingsError::BadFieldValue(
        "unit_coefficient_tolerance",
    ));

    assert_eq!(
        Dualizer::try_new(primal.clone(), settings.clone()).err(),
        Some(expected.clone())
    );

    let mut dualizer = Dualizer::new(primal, settings);
    assert_eq!(dualizer.check_out_program().unwrap_err(), expected);
    assert!(!expected.is_protocol_violation());

    dualizer.settings.unit_coefficient_tolerance = 0.0;
    assert!(dualizer.check_out_program().is_ok());
}
