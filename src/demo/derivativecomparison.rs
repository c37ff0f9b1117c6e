use std::fmt;

use serde::Serialize;

use crate::chart::figure::{
    Figure,
    Layer,
    MarkerShape,
    Panel,
    fit_range,
    palette
};
use crate::demo::demo::{
    DemoError,
    Demonstration
};
use crate::math::curve::bernoulli::BernoulliTerm;
use crate::math::curve::curve::Curve;
use crate::math::grid::{
    Grid,
    Samples
};

/// f(p) = p^7(1-p)^3 與 log f(p) 的導數比較。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivativeComparison {
    term: BernoulliTerm,
    lower: f64,
    upper: f64,
    resolution: usize,
    probe: f64
}

impl Default for DerivativeComparison {
    fn default() -> Self {
        DerivativeComparison {
            term: BernoulliTerm::new(7, 3),
            lower: 0.01,
            upper: 0.99,
            resolution: 1000,
            probe: 0.01
        }
    }
}

impl DerivativeComparison {
    pub const FILE_NAME: &'static str = "compare_derivatives.png";
}

/// 某個取樣點上的函數值與兩種導數。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivativeProbe {
    p: f64,
    value: f64,
    derivative: f64,
    log_derivative: f64
}

impl DerivativeProbe {
    fn at(term: &BernoulliTerm, p: f64) -> DerivativeProbe {
        DerivativeProbe {
            p,
            value: term.value(p),
            derivative: term.derivative(p),
            log_derivative: term.log_derivative(p)
        }
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn derivative(&self) -> f64 {
        self.derivative
    }

    pub fn log_derivative(&self) -> f64 {
        self.log_derivative
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DerivativeComparisonReport {
    at_mode: DerivativeProbe,
    at_first_point: DerivativeProbe,
    at_probe: DerivativeProbe,
    #[serde(skip)]
    value: Samples,
    #[serde(skip)]
    derivative: Samples,
    #[serde(skip)]
    log_value: Samples,
    #[serde(skip)]
    log_derivative: Samples
}

impl DerivativeComparisonReport {
    pub fn at_mode(&self) -> &DerivativeProbe {
        &self.at_mode
    }

    pub fn at_first_point(&self) -> &DerivativeProbe {
        &self.at_first_point
    }

    pub fn at_probe(&self) -> &DerivativeProbe {
        &self.at_probe
    }
}

impl fmt::Display for DerivativeComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Derivatives at key points ===")?;
        writeln!(f, "At p = {:.4} (grid point nearest the maximum):", self.at_mode.p)?;
        writeln!(f, "  derivative of probability:     {:.6}", self.at_mode.derivative)?;
        writeln!(f, "  derivative of log probability: {:.6}", self.at_mode.log_derivative)?;
        writeln!(f, "As p -> 0 (p = {:.4}):", self.at_first_point.p)?;
        writeln!(f, "  probability:                   {:.6}", self.at_first_point.value)?;
        writeln!(f, "  derivative of probability:     {:.6}", self.at_first_point.derivative)?;
        writeln!(f, "  derivative of log probability: {:.6} -> +inf", self.at_first_point.log_derivative)?;
        writeln!(f, "At p = {:.4}:", self.at_probe.p)?;
        writeln!(f, "  probability:                   {:.6}", self.at_probe.value)?;
        writeln!(f, "  derivative of probability:     {:.8}", self.at_probe.derivative)?;
        write!(f, "  derivative of log probability: {:.2}", self.at_probe.log_derivative)
    }
}

impl Demonstration for DerivativeComparison {
    type Report = DerivativeComparisonReport;

    fn analyze(&self) -> Result<Self::Report, DemoError> {
        let grid = Grid::linspace(self.lower, self.upper, self.resolution)?;
        let log_likelihood = self.term.log_likelihood();
        let probe_at = |x: f64| {
            let p = grid.get(grid.nearest_index(x)).unwrap_or(x);
            DerivativeProbe::at(&self.term, p)
        };
        Ok(DerivativeComparisonReport {
            at_mode: probe_at(self.term.mode()),
            at_first_point: DerivativeProbe::at(&self.term, grid.start()),
            at_probe: probe_at(self.probe),
            value: self.term.sample(&grid),
            derivative: self.term.sample_derivative(&grid),
            log_value: log_likelihood.sample(&grid),
            log_derivative: log_likelihood.sample_derivative(&grid)
        })
    }

    fn figure(&self, report: &Self::Report) -> Result<Figure, DemoError> {
        let mode = self.term.mode();
        let top = report.value.max_value().unwrap_or(1.0) * 1.1;
        let log_range = fit_range(report.log_value.y().iter().copied().chain([0.0]), 0.05, -40.0..0.0);

        let value_panel = Panel::new("Original Probability Function", 0.0..1.0, 0.0..top)
            .axes("p", "Probability")
            .layer(Layer::area(&report.value, palette::BLUE))
            .layer(Layer::curve(&report.value, palette::BLUE).with_label("f(p) = p^7(1-p)^3"));

        let derivative_panel = Panel::new("Derivative of Original Probability", 0.0..1.0, -0.01..0.01)
            .axes("p", "Derivative")
            .layer(Layer::curve(&report.derivative, palette::GREEN).with_label("f'(p)"))
            .layer(Layer::hline(0.0, palette::BLACK))
            .layer(Layer::marker((mode, 0.0), MarkerShape::Circle, palette::RED))
            .layer(Layer::text((0.45, 0.006), format!("p={}\nf'(p)=0", mode)).with_color(palette::RED));

        let log_panel = Panel::new("Log Probability Function", 0.0..1.0, log_range)
            .axes("p", "Log Probability")
            .layer(Layer::area(&report.log_value, palette::RED))
            .layer(Layer::curve(&report.log_value, palette::RED).with_label("log f(p) = 7 log(p) + 3 log(1-p)"));

        let log_derivative_panel = Panel::new("Derivative of Log Probability", 0.0..1.0, -50.0..50.0)
            .axes("p", "Derivative")
            .layer(Layer::curve(&report.log_derivative, palette::MAGENTA).with_label("d/dp log f(p) = 7/p - 3/(1-p)"))
            .layer(Layer::hline(0.0, palette::BLACK))
            .layer(Layer::marker((mode, 0.0), MarkerShape::Circle, palette::RED))
            .layer(Layer::text((0.45, 25.0), format!("p={}\nd/dp[log f]=0", mode)).with_color(palette::RED));

        Ok(Figure::new(Self::FILE_NAME, 2, 2)
            .panel(value_panel)
            .panel(derivative_panel)
            .panel(log_panel)
            .panel(log_derivative_panel))
    }
}
