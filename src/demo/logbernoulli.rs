use std::fmt;

use plotters::style::RGBColor;
use serde::Serialize;

use crate::chart::figure::{
    Figure,
    Layer,
    Panel,
    fit_range,
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

/// 機率與對數機率並列：取對數不改變極大值點。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogBernoulli {
    binomial: BinomialProbability,
    lower: f64,
    upper: f64,
    resolution: usize
}

impl Default for LogBernoulli {
    fn default() -> Self {
        LogBernoulli {
            binomial: BinomialProbability::from_term(BernoulliTerm::new(7, 3)),
            lower: 0.01,
            upper: 0.99,
            resolution: 1000
        }
    }
}

impl LogBernoulli {
    pub const FILE_NAME: &'static str = "log_bernoulli_distribution.png";
}

#[derive(Debug, Clone, Serialize)]
pub struct LogBernoulliReport {
    log_term_peak: Extremum,
    log_likelihood_peak: Extremum,
    exp_of_log_max: f64,
    term_at_log_peak: f64,
    #[serde(skip)]
    term: Samples,
    #[serde(skip)]
    log_term: Samples,
    #[serde(skip)]
    binomial: Samples,
    #[serde(skip)]
    log_likelihood: Samples
}

impl LogBernoulliReport {
    pub fn log_term_peak(&self) -> &Extremum {
        &self.log_term_peak
    }

    pub fn log_likelihood_peak(&self) -> &Extremum {
        &self.log_likelihood_peak
    }

    pub fn exp_of_log_max(&self) -> f64 {
        self.exp_of_log_max
    }

    pub fn term_at_log_peak(&self) -> f64 {
        self.term_at_log_peak
    }
}

impl fmt::Display for LogBernoulliReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Log probability log[p^7(1-p)^3]:")?;
        writeln!(f, "  maximum at p = {:.4}", self.log_term_peak.x())?;
        writeln!(f, "  maximum value {:.6}", self.log_term_peak.value())?;
        writeln!(f, "Log likelihood log[P(X=7|n=10,p)]:")?;
        writeln!(f, "  maximum at p = {:.4}", self.log_likelihood_peak.x())?;
        writeln!(f, "  maximum value {:.6}", self.log_likelihood_peak.value())?;
        writeln!(f, "Check: exp({:.6}) = {:.6}", self.log_term_peak.value(), self.exp_of_log_max)?;
        write!(f, "Original probability at that point = {:.6}", self.term_at_log_peak)
    }
}

impl Demonstration for LogBernoulli {
    type Report = LogBernoulliReport;

    fn analyze(&self) -> Result<Self::Report, DemoError> {
        let grid = Grid::linspace(self.lower, self.upper, self.resolution)?;
        let term_curve = self.binomial.term();
        let term = term_curve.sample(&grid);
        let log_term = term_curve.log_likelihood().sample(&grid);
        let binomial = self.binomial.sample(&grid);
        let log_likelihood = self.binomial.log_likelihood().sample(&grid);

        let log_term_peak = peak_of(&log_term, "log probability")?;
        let log_likelihood_peak = peak_of(&log_likelihood, "log likelihood")?;
        Ok(LogBernoulliReport {
            exp_of_log_max: log_term_peak.value().exp(),
            term_at_log_peak: term.y()[log_term_peak.index()],
            log_term_peak,
            log_likelihood_peak,
            term,
            log_term,
            binomial,
            log_likelihood
        })
    }

    fn figure(&self, report: &Self::Report) -> Result<Figure, DemoError> {
        let probability_panel = |title: &str, samples: &Samples, color: RGBColor, label: &str| {
            let top = samples.max_value().unwrap_or(1.0) * 1.1;
            Panel::new(title, 0.0..1.0, 0.0..top)
                .axes("p", "Probability")
                .layer(Layer::area(samples, color))
                .layer(Layer::curve(samples, color).with_label(label))
        };
        let log_panel = |title: &str, samples: &Samples, color: RGBColor, label: &str, y_label: &str, peak: &Extremum, name: &str| {
            let y_range = fit_range(samples.y().iter().copied().chain([0.0]), 0.05, -40.0..0.0);
            let drop = 0.15 * (y_range.end - y_range.start);
            Panel::new(title, 0.0..1.0, y_range)
                .axes("p", y_label)
                .layer(Layer::area(samples, color))
                .layer(Layer::curve(samples, color).with_label(label))
                .layers_from(annotate_peak(peak, name, 3, (-0.45, -drop)))
        };

        Ok(Figure::new(Self::FILE_NAME, 2, 2)
            .panel(probability_panel("Original: p^7(1-p)^3", &report.term, palette::BLUE, "f(p) = p^7(1-p)^3"))
            .panel(log_panel(
                "Log: log[p^7(1-p)^3]",
                &report.log_term,
                palette::RED,
                "log f(p) = 7 log(p) + 3 log(1-p)",
                "Log Probability",
                &report.log_term_peak,
                "log(f)"
            ))
            .panel(probability_panel(
                "Original Binomial: P(X=7|n=10, p)",
                &report.binomial,
                palette::GREEN,
                "P(X=7) = C(10,7) p^7(1-p)^3"
            ))
            .panel(log_panel(
                "Log Likelihood: log[P(X=7|n=10, p)]",
                &report.log_likelihood,
                palette::MAGENTA,
                "log L(p) = log C(10,7) + 7 log(p) + 3 log(1-p)",
                "Log Likelihood",
                &report.log_likelihood_peak,
                "log(L)"
            )))
    }
}
