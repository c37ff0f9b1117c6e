//! Properties of the analytic curves and series.

use std::f64::consts::{
    E,
    LN_2
};

use approx::{
    assert_abs_diff_eq,
    assert_relative_eq
};

use mathforml::interestrate::compounding::Compounding;
use mathforml::math::curve::bernoulli::{
    BernoulliTerm,
    BinomialProbability
};
use mathforml::math::curve::curve::{
    Curve,
    CurveIntegration
};
use mathforml::math::curve::entropy::{
    BernoulliEntropy,
    LogBase,
    NegativeXLogX
};
use mathforml::math::curve::exponential::{
    CompoundLimit,
    Exponential
};
use mathforml::math::curve::logistic::{
    Activity,
    ReversedSigmoid,
    SATURATION_THRESHOLD,
    Sigmoid
};
use mathforml::math::grid::Grid;
use mathforml::math::series::{
    cumulative_sums,
    exp_taylor_terms
};

// ============================================================================
// Bernoulli
// ============================================================================

#[test]
fn test_bernoulli_term_peaks_at_seven_tenths() {
    let term = BernoulliTerm::new(7, 3);
    let grid = Grid::linspace(0.0, 1.0, 1000).unwrap();
    let peak = term.sample(&grid).argmax().unwrap();

    assert_abs_diff_eq!(peak.x(), 0.7, epsilon = 1e-3);
    assert_relative_eq!(term.value(0.7), 0.7f64.powi(7) * 0.3f64.powi(3), max_relative = 1e-12);
    assert_relative_eq!(peak.value(), term.value(0.7), max_relative = 1e-4);
}

#[test]
fn test_binomial_shares_the_argmax() {
    let binomial = BinomialProbability::new(10, 7).unwrap();
    let grid = Grid::linspace(0.0, 1.0, 1000).unwrap();
    let term_peak = binomial.term().sample(&grid).argmax().unwrap();
    let binomial_peak = binomial.sample(&grid).argmax().unwrap();

    assert_eq!(term_peak.index(), binomial_peak.index());
    assert_relative_eq!(binomial.value(0.7), 120.0 * binomial.term().value(0.7), max_relative = 1e-12);
    assert_eq!(BinomialProbability::from_term(BernoulliTerm::new(7, 3)), binomial);
}

#[test]
fn test_log_likelihood_matches_log_of_probability() {
    let binomial = BinomialProbability::new(10, 7).unwrap();
    let log_likelihood = binomial.log_likelihood();
    for p in [0.05, 0.3, 0.7, 0.95] {
        assert_relative_eq!(log_likelihood.value(p), binomial.value(p).ln(), max_relative = 1e-10);
    }
    assert_relative_eq!(log_likelihood.offset(), 120f64.ln(), max_relative = 1e-12);
    assert_eq!(binomial.term().log_likelihood().offset(), 0.0);
}

// ============================================================================
// Entropy
// ============================================================================

#[test]
fn test_entropy_maximum_depends_only_on_base() {
    assert_relative_eq!(BernoulliEntropy::new(LogBase::E).max_value(), LN_2, max_relative = 1e-12);
    assert_relative_eq!(BernoulliEntropy::new(LogBase::Two).max_value(), 1.0, max_relative = 1e-12);
    assert_relative_eq!(BernoulliEntropy::new(LogBase::Ten).max_value(), 2f64.log10(), max_relative = 1e-12);

    let grid = Grid::linspace(0.001, 0.999, 1000).unwrap();
    for base in [LogBase::E, LogBase::Two, LogBase::Ten] {
        let entropy = BernoulliEntropy::new(base);
        assert_relative_eq!(entropy.value(0.5), entropy.max_value(), max_relative = 1e-12);
        let peak = entropy.sample(&grid).argmax().unwrap();
        assert_abs_diff_eq!(peak.x(), 0.5, epsilon = 1e-3);
        assert_abs_diff_eq!(entropy.derivative(0.5), 0.0, epsilon = 1e-12);
    }
}

#[test]
fn test_entropy_is_symmetric() {
    let entropy = BernoulliEntropy::new(LogBase::Two);
    for p in [0.01, 0.2, 0.35] {
        assert_relative_eq!(entropy.value(p), entropy.value(1.0 - p), max_relative = 1e-12);
    }
}

#[test]
fn test_negative_x_log_x_peaks_at_inverse_e() {
    for base in [LogBase::E, LogBase::Two, LogBase::Ten] {
        let curve = NegativeXLogX::new(base);
        assert_relative_eq!(curve.argmax(), 1.0 / E);
        assert_relative_eq!(curve.value(1.0 / E), curve.max_value(), max_relative = 1e-12);
        assert_abs_diff_eq!(curve.derivative(1.0 / E), 0.0, epsilon = 1e-12);
    }
    assert_relative_eq!(NegativeXLogX::new(LogBase::E).max_value(), 1.0 / E, max_relative = 1e-12);

    let grid = Grid::linspace(0.001, 5.0, 1000).unwrap();
    let peak = NegativeXLogX::new(LogBase::E).sample(&grid).argmax().unwrap();
    assert_abs_diff_eq!(peak.x(), 1.0 / E, epsilon = 5e-3);
}

#[test]
fn test_larger_base_gives_smaller_values() {
    let x = 0.2;
    let natural = NegativeXLogX::new(LogBase::E).value(x);
    let binary = NegativeXLogX::new(LogBase::Two).value(x);
    let decimal = NegativeXLogX::new(LogBase::Ten).value(x);
    assert!(binary < natural);
    assert!(decimal < binary);
}

// ============================================================================
// Exponential and compound limit
// ============================================================================

#[test]
fn test_compound_limit_increases_toward_e() {
    let g = CompoundLimit;
    assert_eq!(g.value(1.0), 2.0);

    let xs = [1.0, 2.0, 5.0, 10.0, 50.0, 100.0, 1000.0];
    let gaps: Vec<f64> = xs.iter().map(|&x| E - g.value(x)).collect();
    for pair in gaps.windows(2) {
        assert!(pair[1] < pair[0]);
        assert!(pair[1] > 0.0);
    }
    assert_abs_diff_eq!(g.value(1000.0), E, epsilon = 2e-3);
    assert_eq!(g.limit(), E);
}

#[test]
fn test_exponential_landmarks_and_integral() {
    assert_eq!(Exponential.value(0.0), 1.0);
    assert_relative_eq!(Exponential.value(1.0), E);
    assert_relative_eq!(Exponential.value(-1.0), 1.0 / E);
    assert_relative_eq!(Exponential.integral(0.0, 1.0) - 1.0, E - 2.0, max_relative = 1e-12);
}

// ============================================================================
// Sigmoid
// ============================================================================

#[test]
fn test_sigmoid_symmetry() {
    assert_eq!(Sigmoid.value(0.0), 0.5);
    for x in [-8.0, -1.0, 0.3, 2.0, 9.5] {
        assert_relative_eq!(Sigmoid.value(x) + Sigmoid.value(-x), 1.0, max_relative = 1e-14);
        assert_relative_eq!(ReversedSigmoid.value(x), 1.0 - Sigmoid.value(x), epsilon = 1e-14);
        assert_relative_eq!(ReversedSigmoid.derivative(x), -Sigmoid.derivative(x));
    }
}

#[test]
fn test_sigmoid_gradient_peaks_at_zero() {
    assert_eq!(Sigmoid.derivative(0.0), Sigmoid.max_derivative());

    let grid = Grid::linspace(-10.0, 10.0, 1000).unwrap();
    let peak = Sigmoid.sample_derivative(&grid).argmax().unwrap();
    assert_abs_diff_eq!(peak.x(), 0.0, epsilon = 0.011);
    assert_abs_diff_eq!(peak.value(), 0.25, epsilon = 1e-4);
}

#[test]
fn test_sigmoid_is_strictly_increasing() {
    let grid = Grid::linspace(-10.0, 10.0, 1000).unwrap();
    let values = Sigmoid.sample(&grid);
    for (i, pair) in values.y().as_slice().windows(2).enumerate() {
        assert!(pair[1] > pair[0], "not increasing at x = {}", grid.get(i).unwrap());
    }

    // 兩個計算分支在 0 交接
    let around_zero = [-1e-9, 0.0, 1e-9];
    assert!(around_zero.windows(2).all(|pair| Sigmoid.value(pair[1]) > Sigmoid.value(pair[0])));

    let reversed = ReversedSigmoid.sample(&grid);
    assert!(reversed.y().as_slice().windows(2).all(|pair| pair[1] < pair[0]));
}

#[test]
fn test_sigmoid_saturates_beyond_five() {
    for x in [-10.0, -5.0, 5.0, 10.0] {
        assert_eq!(Sigmoid.activity(x, SATURATION_THRESHOLD), Activity::Saturated);
    }
    for x in [-3.0, -1.0, 0.0, 2.0, 3.0] {
        assert_eq!(Sigmoid.activity(x, SATURATION_THRESHOLD), Activity::Active);
    }
}

// ============================================================================
// Compounding and series
// ============================================================================

#[test]
fn test_more_frequent_compounding_pays_more() {
    let frequencies = [
        Compounding::Annual,
        Compounding::Semiannual,
        Compounding::Quarterly,
        Compounding::Monthly,
        Compounding::Weekly,
        Compounding::Daily,
        Compounding::Hourly,
        Compounding::EveryMinute
    ];
    let amounts: Vec<f64> = frequencies.iter().map(|c| c.future_value(1.0, 1.0)).collect();

    assert_eq!(amounts[0], 2.0);
    for pair in amounts.windows(2) {
        assert!(pair[1] > pair[0]);
    }
    assert!(amounts.iter().all(|&amount| amount < E));
    assert_abs_diff_eq!(amounts[7], E, epsilon = 1e-5);
    assert_eq!(Compounding::Simple.future_value(1.0, 1.0), 2.0);
    assert_relative_eq!(Compounding::Continuous.future_value(1.0, 1.0), E);
}

#[test]
fn test_taylor_terms_sum_to_e_minus_two() {
    let terms = exp_taylor_terms(2, 7);
    let values: Vec<f64> = terms.iter().map(|term| term.value()).collect();
    let sums = cumulative_sums(&values);

    assert_eq!(terms[0].label(), "1/2!");
    assert_eq!(values[0], 0.5);
    assert_abs_diff_eq!(*sums.last().unwrap(), E - 2.0, epsilon = 1e-5);
    for pair in sums.windows(2) {
        assert!(pair[1] > pair[0]);
    }
}

#[test]
fn test_trapezoid_recovers_integral() {
    let grid = Grid::linspace(0.0, 1.0, 1001).unwrap();
    let integral = grid.evaluate(|x| x.exp() - 1.0).trapezoid();
    assert_abs_diff_eq!(integral, E - 2.0, epsilon = 1e-6);
}
