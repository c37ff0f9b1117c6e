//! Reports and chart layouts of every demo, without touching the file system.

use std::collections::HashSet;
use std::f64::consts::E;

use approx::{
    assert_abs_diff_eq,
    assert_relative_eq
};

use mathforml::chart::renderer::validate;
use mathforml::configuration::Configuration;
use mathforml::demo::bernoullidistribution::BernoulliDistribution;
use mathforml::demo::bernoullientropy::BernoulliEntropyComparison;
use mathforml::demo::compoundinterest::CompoundInterest;
use mathforml::demo::compoundlimit::CompoundLimitPlot;
use mathforml::demo::demo::{
    Demo,
    Demonstration,
    RunContext
};
use mathforml::demo::derivativecomparison::DerivativeComparison;
use mathforml::demo::exponentialfunction::ExponentialFunction;
use mathforml::demo::gradientdescentmonitor::GradientDescentMonitor;
use mathforml::demo::logbasecomparison::LogBaseComparison;
use mathforml::demo::logbernoulli::LogBernoulli;
use mathforml::demo::negativexlogx::NegativeXLogXPlot;
use mathforml::demo::sigmoidfunctions::SigmoidFunctions;
use mathforml::demo::sigmoidsaturation::SigmoidSaturation;
use mathforml::math::curve::logistic::Activity;
use mathforml::optimize::fixedstepdescent::{
    DescentSettings,
    Termination
};
use mathforml::optimize::objective::ExpMinusLog;

fn analyze_and_layout<D: Demonstration>(demonstration: &D, file_name: &str) -> D::Report {
    let report = demonstration.analyze().unwrap();
    let figure = demonstration.figure(&report).unwrap();
    validate(&figure).unwrap();
    assert_eq!(figure.file_name(), file_name);
    assert!(!report.to_string().is_empty());
    report
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_demo_names_round_trip() {
    for demo in Demo::ALL {
        assert_eq!(Demo::from_name(demo.name()), Some(demo));
        assert_eq!(demo.to_string(), demo.name());
    }
    assert_eq!(Demo::from_name("all"), None);
}

#[test]
fn test_file_names_are_unique_pngs() {
    let names: HashSet<&str> = Demo::ALL.iter().map(|demo| demo.file_name()).collect();
    assert_eq!(names.len(), Demo::ALL.len());
    assert!(names.iter().all(|name| name.ends_with(".png")));
}

#[test]
fn test_every_demo_runs_without_charts() {
    let context = RunContext::new(&Configuration::new(), false);
    for demo in Demo::ALL {
        let output = demo.run(&context).unwrap();
        assert_eq!(output.demo(), demo.name());
        assert!(output.chart().is_none());
        assert!(output.report().is_object());
        assert!(!output.summary().is_empty());
    }
}

// ============================================================================
// Individual reports
// ============================================================================

#[test]
fn test_bernoulli_report() {
    let report = analyze_and_layout(&BernoulliDistribution::default(), BernoulliDistribution::FILE_NAME);
    assert_abs_diff_eq!(report.term_peak().x(), 0.7, epsilon = 1e-3);
    assert_eq!(report.binomial_peak().index(), report.term_peak().index());
    assert_eq!(report.coefficient(), 120.0);
    assert_eq!(report.analytic_mode(), 0.7);
    assert_relative_eq!(report.analytic_term_max(), 0.7f64.powi(7) * 0.3f64.powi(3), max_relative = 1e-12);
}

#[test]
fn test_log_bernoulli_report() {
    let report = analyze_and_layout(&LogBernoulli::default(), LogBernoulli::FILE_NAME);
    assert_abs_diff_eq!(report.log_term_peak().x(), 0.7, epsilon = 1e-3);
    assert_eq!(report.log_term_peak().index(), report.log_likelihood_peak().index());
    assert_relative_eq!(report.exp_of_log_max(), report.term_at_log_peak(), max_relative = 1e-10);
    assert_relative_eq!(
        report.log_likelihood_peak().value() - report.log_term_peak().value(),
        120f64.ln(),
        max_relative = 1e-10
    );
}

#[test]
fn test_derivative_report() {
    let report = analyze_and_layout(&DerivativeComparison::default(), DerivativeComparison::FILE_NAME);
    assert_abs_diff_eq!(report.at_mode().p(), 0.7, epsilon = 1e-3);
    assert!(report.at_mode().derivative().abs() < 1e-4);
    assert!(report.at_mode().log_derivative().abs() < 0.1);

    let probe = report.at_probe();
    assert_eq!(probe.p(), 0.01);
    assert_relative_eq!(probe.log_derivative(), 700.0 - 3.0 / 0.99, max_relative = 1e-12);
    assert!(probe.derivative().abs() < 1e-10);
    assert_eq!(report.at_first_point().p(), 0.01);
}

#[test]
fn test_entropy_and_log_base_reports() {
    let entropy = analyze_and_layout(&BernoulliEntropyComparison::default(), BernoulliEntropyComparison::FILE_NAME);
    assert_eq!(entropy.maxima().len(), 3);
    for maximum in entropy.maxima() {
        assert_eq!(maximum.argmax(), 0.5);
        assert_abs_diff_eq!(maximum.sampled().x(), 0.5, epsilon = 1e-3);
        assert_relative_eq!(maximum.sampled().value(), maximum.max_value(), max_relative = 1e-5);
    }

    let bases = analyze_and_layout(&LogBaseComparison::default(), LogBaseComparison::FILE_NAME);
    for maximum in bases.maxima() {
        assert_relative_eq!(maximum.argmax(), 1.0 / E);
        assert_relative_eq!(maximum.max_value(), 1.0 / (E * maximum.base().ln()), max_relative = 1e-12);
        assert_abs_diff_eq!(maximum.sampled().x(), 1.0 / E, epsilon = 3e-3);
    }

    let single = analyze_and_layout(&NegativeXLogXPlot::default(), NegativeXLogXPlot::FILE_NAME);
    assert_relative_eq!(single.maximum().max_value(), 1.0 / E, max_relative = 1e-12);
}

#[test]
fn test_exponential_and_limit_reports() {
    let exponential = analyze_and_layout(&ExponentialFunction::default(), ExponentialFunction::FILE_NAME);
    let ys: Vec<f64> = exponential.landmarks().iter().map(|landmark| landmark.y()).collect();
    assert_eq!(ys[0], 1.0);
    assert_relative_eq!(ys[1], E);
    assert_relative_eq!(ys[2], 1.0 / E);

    let limit = analyze_and_layout(&CompoundLimitPlot::default(), CompoundLimitPlot::FILE_NAME);
    assert_eq!(limit.rows().len(), 7);
    assert_eq!(limit.rows()[0].value(), 2.0);
    for pair in limit.rows().windows(2) {
        assert!(pair[1].gap() < pair[0].gap());
        assert!(pair[1].value() > pair[0].value());
    }
}

#[test]
fn test_compound_interest_report() {
    let report = analyze_and_layout(&CompoundInterest::default(), CompoundInterest::FILE_NAME);
    assert_eq!(report.simple(), 2.0);
    assert_relative_eq!(report.continuous(), E);
    assert_relative_eq!(report.bonus(), E - 2.0, max_relative = 1e-12);
    assert_eq!(report.rows().len(), 8);
    for row in report.rows() {
        assert!(row.amount() < E);
        assert!(row.continuous_rate() <= 1.0);
    }
    assert_eq!(report.taylor_terms().len(), 7);
    assert_abs_diff_eq!(*report.taylor_partial_sums().last().unwrap(), report.bonus(), epsilon = 1e-5);
    assert_abs_diff_eq!(report.integral_trapezoid(), report.bonus(), epsilon = 1e-6);
    assert_relative_eq!(report.integral_exact(), report.bonus(), max_relative = 1e-12);
}

#[test]
fn test_sigmoid_reports() {
    let functions = analyze_and_layout(&SigmoidFunctions::default(), SigmoidFunctions::FILE_NAME);
    assert_eq!(functions.probes()[0].sigmoid(), 0.5);
    assert_relative_eq!(functions.sum_at_one(), 1.0, max_relative = 1e-14);

    let saturation = analyze_and_layout(&SigmoidSaturation::default(), SigmoidSaturation::FILE_NAME);
    assert_abs_diff_eq!(saturation.max_gradient().value(), 0.25, epsilon = 1e-4);
    assert_eq!(saturation.probes().len(), 11);
    for probe in saturation.probes() {
        let expected = if probe.x().abs() >= 5.0 {
            Activity::Saturated
        } else {
            Activity::Active
        };
        assert_eq!(probe.activity(), expected, "x = {}", probe.x());
    }
}

#[test]
fn test_gradient_descent_report() {
    let report = analyze_and_layout(&GradientDescentMonitor::default(), GradientDescentMonitor::FILE_NAME);
    assert!(matches!(report.termination(), Termination::Converged { .. }));
    assert_abs_diff_eq!(report.x(), ExpMinusLog::MINIMIZER, epsilon = 1e-6);
    assert!(report.gradient().abs() < 1e-6);
    assert_eq!(report.iterations(), report.history().len());

    let figure = GradientDescentMonitor::default().figure(&report).unwrap();
    let loss_panel = &figure.panels()[0];
    assert!(loss_panel.log_y());
    assert!(loss_panel.y_range().start > 0.0);
    assert!(figure.panels()[1..].iter().all(|panel| !panel.log_y()));

    let unstable = GradientDescentMonitor::new(DescentSettings {
        learning_rate: 1.0,
        ..DescentSettings::default()
    });
    let report = analyze_and_layout(&unstable, GradientDescentMonitor::FILE_NAME);
    assert!(matches!(report.termination(), Termination::LeftDomain { iteration: 1, .. }));
    assert!(report.x() > 0.0);
}

#[test]
fn test_invalid_descent_settings_fail_the_demo() {
    let monitor = GradientDescentMonitor::new(DescentSettings {
        learning_rate: -0.1,
        ..DescentSettings::default()
    });
    assert!(monitor.analyze().is_err());
}
