use std::fmt;

use serde::Serialize;

use crate::chart::figure::{
    Figure,
    Layer,
    Panel,
    palette
};
use crate::demo::demo::{
    DemoError,
    Demonstration,
    annotate_peak,
    peak_of
};
use crate::math::curve::bernoulli::{
    BernoulliTerm,
    BinomialProbability
};
use crate::math::curve::curve::Curve;
use crate::math::grid::{
    Extremum,
    Grid,
    Samples
};

/// p^7(1-p)^3 與完整的二項分布機率 C(10,7)·p^7(1-p)^3。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BernoulliDistribution {
    term: BernoulliTerm,
    binomial: BinomialProbability,
    resolution: usize
}

impl Default for BernoulliDistribution {
    fn default() -> Self {
        BernoulliDistribution::new(7, 3)
    }
}

impl BernoulliDistribution {
    pub const FILE_NAME: &'static str = "bernoulli_distribution.png";

    pub fn new(successes: u32, failures: u32) -> BernoulliDistribution {
        let term = BernoulliTerm::new(successes, failures);
        BernoulliDistribution {
            term,
            binomial: BinomialProbability::from_term(term),
            resolution: 1000
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BernoulliDistributionReport {
    successes: u32,
    failures: u32,
    coefficient: f64,
    term_peak: Extremum,
    binomial_peak: Extremum,
    analytic_mode: f64,
    analytic_term_max: f64,
    analytic_binomial_max: f64,
    #[serde(skip)]
    term_samples: Samples,
    #[serde(skip)]
    binomial_samples: Samples
}

impl BernoulliDistributionReport {
    pub fn term_peak(&self) -> &Extremum {
        &self.term_peak
    }

    pub fn binomial_peak(&self) -> &Extremum {
        &self.binomial_peak
    }

    pub fn analytic_mode(&self) -> f64 {
        self.analytic_mode
    }

    pub fn analytic_term_max(&self) -> f64 {
        self.analytic_term_max
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }
}

impl fmt::Display for BernoulliDistributionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (k, m) = (self.successes, self.failures);
        writeln!(f, "Function p^{}(1-p)^{}:", k, m)?;
        writeln!(f, "  sampled maximum at p = {:.4}", self.term_peak.x())?;
        writeln!(f, "  sampled maximum value {:.6}", self.term_peak.value())?;
        writeln!(f, "  analytic maximum at p = {}/{} = {:.4}, value {:.6}", k, k + m, self.analytic_mode, self.analytic_term_max)?;
        writeln!(f, "Binomial probability C({},{})*p^{}(1-p)^{} (C = {}):", k + m, k, k, m, self.coefficient)?;
        writeln!(f, "  sampled maximum at p = {:.4}", self.binomial_peak.x())?;
        write!(f, "  sampled maximum probability {:.6} (analytic {:.6})", self.binomial_peak.value(), self.analytic_binomial_max)
    }
}

impl Demonstration for BernoulliDistribution {
    type Report = BernoulliDistributionReport;

    fn analyze(&self) -> Result<Self::Report, DemoError> {
        let grid = Grid::linspace(0.0, 1.0, self.resolution)?;
        let term_samples = self.term.sample(&grid);
        let binomial_samples = self.binomial.sample(&grid);
        let mode = self.term.mode();
        Ok(BernoulliDistributionReport {
            successes: self.term.successes(),
            failures: self.term.failures(),
            coefficient: self.binomial.coefficient(),
            term_peak: peak_of(&term_samples, "Bernoulli term")?,
            binomial_peak: peak_of(&binomial_samples, "binomial probability")?,
            analytic_mode: mode,
            analytic_term_max: self.term.value(mode),
            analytic_binomial_max: self.binomial.value(mode),
            term_samples,
            binomial_samples
        })
    }

    fn figure(&self, report: &Self::Report) -> Result<Figure, DemoError> {
        let (k, m) = (report.successes, report.failures);
        let term_max = report.term_peak.value();
        let binomial_max = report.binomial_peak.value();

        let term_panel = Panel::new(format!("Bernoulli Distribution Term: p^{}(1-p)^{}", k, m), 0.0..1.0, 0.0..term_max * 1.1)
            .axes("p", "Probability")
            .layer(Layer::area(&report.term_samples, palette::BLUE))
            .layer(Layer::curve(&report.term_samples, palette::BLUE).with_label(format!("f(p) = p^{}(1-p)^{}", k, m)))
            .layers_from(annotate_peak(&report.term_peak, "f(p)", 6, (-0.45, -0.1 * term_max)));

        let binomial_panel = Panel::new(format!("Binomial Distribution: P(X={}|n={}, p)", k, k + m), 0.0..1.0, 0.0..binomial_max * 1.1)
            .axes("p", "Probability")
            .layer(Layer::area(&report.binomial_samples, palette::GREEN))
            .layer(
                Layer::curve(&report.binomial_samples, palette::GREEN)
                    .with_label(format!("P(X={}) = C({},{}) p^{}(1-p)^{}", k, k + m, k, k, m))
            )
            .layers_from(annotate_peak(&report.binomial_peak, "Probability", 6, (-0.45, -0.1 * binomial_max)));

        Ok(Figure::new(Self::FILE_NAME, 1, 2).panel(term_panel).panel(binomial_panel))
    }
}
