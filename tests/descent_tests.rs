//! Fixed-step gradient descent on f(x) = e^x - ln(x).

use approx::assert_abs_diff_eq;

use mathforml::math::curve::curve::Curve;
use mathforml::optimize::fixedstepdescent::{
    DescentSettings,
    FixedStepDescent,
    Termination
};
use mathforml::optimize::objective::ExpMinusLog;

#[test]
fn test_default_settings_converge_to_omega() {
    let descent = FixedStepDescent::new(DescentSettings::default()).unwrap();
    let outcome = descent.minimize(&ExpMinusLog).unwrap();

    assert!(outcome.converged());
    assert_abs_diff_eq!(outcome.x(), ExpMinusLog::MINIMIZER, epsilon = 1e-6);
    assert!(ExpMinusLog.derivative(outcome.x()).abs() < 1e-6);

    // 收斂那一步也會被記錄
    let Termination::Converged { iteration } = outcome.termination() else {
        panic!("expected convergence, got {:?}", outcome.termination());
    };
    assert_eq!(outcome.history().len(), iteration + 1);
}

#[test]
fn test_losses_decrease_monotonically() {
    let descent = FixedStepDescent::new(DescentSettings::default()).unwrap();
    let outcome = descent.minimize(&ExpMinusLog).unwrap();
    let losses = outcome.history().losses();
    for pair in losses.windows(2) {
        assert!(pair[1] <= pair[0]);
    }
}

#[test]
fn test_large_step_stops_at_domain_boundary() {
    let settings = DescentSettings {
        learning_rate: 1.0,
        ..DescentSettings::default()
    };
    let outcome = FixedStepDescent::new(settings).unwrap().minimize(&ExpMinusLog).unwrap();

    match outcome.termination() {
        Termination::LeftDomain { iteration, rejected_x } => {
            assert_eq!(iteration, 1);
            assert!(rejected_x <= 0.0);
        }
        other => panic!("expected the domain exit, got {:?}", other)
    }
    // 回傳的是最後一個合法的 x
    assert!(outcome.x() > 0.0);
    assert_abs_diff_eq!(outcome.x(), 0.5 - (0.5f64.exp() - 2.0), epsilon = 1e-12);
    assert_eq!(outcome.history().len(), 2);
}

#[test]
fn test_budget_exhaustion_is_reported() {
    let settings = DescentSettings {
        max_iter: 5,
        ..DescentSettings::default()
    };
    let outcome = FixedStepDescent::new(settings).unwrap().minimize(&ExpMinusLog).unwrap();

    assert_eq!(outcome.termination(), Termination::IterationLimit);
    assert!(!outcome.converged());
    assert_eq!(outcome.history().len(), 5);
    assert!(outcome.x() > 0.5 && outcome.x() < ExpMinusLog::MINIMIZER);
}
