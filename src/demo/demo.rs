use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::chart::charterror::ChartError;
use crate::chart::figure::Figure;
use crate::chart::renderer::{
    ChartStyle,
    render
};
use crate::configuration::Configuration;
use crate::demo::bernoullidistribution::BernoulliDistribution;
use crate::demo::bernoullientropy::BernoulliEntropyComparison;
use crate::demo::compoundinterest::CompoundInterest;
use crate::demo::compoundlimit::CompoundLimitPlot;
use crate::demo::derivativecomparison::DerivativeComparison;
use crate::demo::exponentialfunction::ExponentialFunction;
use crate::demo::gradientdescentmonitor::GradientDescentMonitor;
use crate::demo::logbasecomparison::LogBaseComparison;
use crate::demo::logbernoulli::LogBernoulli;
use crate::demo::negativexlogx::NegativeXLogXPlot;
use crate::demo::sigmoidfunctions::SigmoidFunctions;
use crate::demo::sigmoidsaturation::SigmoidSaturation;
use crate::math::grid::{
    Extremum,
    GridError,
    Samples
};
use crate::optimize::fixedstepdescent::{
    DescentError,
    DescentSettings
};

// ─────────────────────────────────────────────────────────────────────────────
// DemoError
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error(transparent)]
    Descent(#[from] DescentError),

    #[error("report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("no finite samples for {0}")]
    NoFiniteSamples(&'static str)
}

pub(crate) fn peak_of(samples: &Samples, what: &'static str) -> Result<Extremum, DemoError> {
    samples.argmax().ok_or(DemoError::NoFiniteSamples(what))
}

// ─────────────────────────────────────────────────────────────────────────────
// Demonstration
// ─────────────────────────────────────────────────────────────────────────────

/// 單一示範：取樣、計算、產生報告與圖表。
pub trait Demonstration {
    type Report: Serialize + fmt::Display;

    fn analyze(&self) -> Result<Self::Report, DemoError>;

    fn figure(&self, report: &Self::Report) -> Result<Figure, DemoError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunContext {
    output_dir: PathBuf,
    chart_style: ChartStyle,
    descent: DescentSettings,
    render_chart: bool
}

impl RunContext {
    pub fn new(configuration: &Configuration, render_chart: bool) -> RunContext {
        RunContext {
            output_dir: configuration.output_dir().to_path_buf(),
            chart_style: configuration.chart_style(),
            descent: *configuration.gradient_descent(),
            render_chart
        }
    }

    pub fn output_dir(&self) -> &std::path::Path {
        &self.output_dir
    }

    pub fn render_chart(&self) -> bool {
        self.render_chart
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoOutput {
    demo: &'static str,
    #[serde(skip)]
    summary: String,
    report: serde_json::Value,
    chart: Option<PathBuf>
}

impl DemoOutput {
    pub fn demo(&self) -> &'static str {
        self.demo
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn report(&self) -> &serde_json::Value {
        &self.report
    }

    pub fn chart(&self) -> Option<&std::path::Path> {
        self.chart.as_deref()
    }
}

fn execute<D: Demonstration>(demo: Demo, demonstration: &D, context: &RunContext) -> Result<DemoOutput, DemoError> {
    let report = demonstration.analyze()?;
    debug!(demo = demo.name(), "analysis finished");
    let chart = if context.render_chart {
        let figure = demonstration.figure(&report)?;
        Some(render(&figure, &context.output_dir, &context.chart_style)?)
    } else {
        None
    };
    Ok(DemoOutput {
        demo: demo.name(),
        summary: report.to_string(),
        report: serde_json::to_value(&report)?,
        chart
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Demo
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Demo {
    Bernoulli,
    LogBernoulli,
    CompareDerivatives,
    BernoulliEntropy,
    NegativeXLogX,
    CompareLogBases,
    Exponential,
    CompoundLimit,
    CompoundInterest,
    SigmoidFunctions,
    SigmoidSaturation,
    GradientDescent
}

impl Demo {
    pub const ALL: [Demo; 12] = [
        Demo::Bernoulli,
        Demo::LogBernoulli,
        Demo::CompareDerivatives,
        Demo::BernoulliEntropy,
        Demo::NegativeXLogX,
        Demo::CompareLogBases,
        Demo::Exponential,
        Demo::CompoundLimit,
        Demo::CompoundInterest,
        Demo::SigmoidFunctions,
        Demo::SigmoidSaturation,
        Demo::GradientDescent
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Demo::Bernoulli => "bernoulli",
            Demo::LogBernoulli => "log-bernoulli",
            Demo::CompareDerivatives => "compare-derivatives",
            Demo::BernoulliEntropy => "bernoulli-entropy",
            Demo::NegativeXLogX => "negative-x-log-x",
            Demo::CompareLogBases => "compare-log-bases",
            Demo::Exponential => "exponential",
            Demo::CompoundLimit => "compound-limit",
            Demo::CompoundInterest => "compound-interest",
            Demo::SigmoidFunctions => "sigmoid-functions",
            Demo::SigmoidSaturation => "sigmoid-saturation",
            Demo::GradientDescent => "gradient-descent"
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Demo::Bernoulli => BernoulliDistribution::FILE_NAME,
            Demo::LogBernoulli => LogBernoulli::FILE_NAME,
            Demo::CompareDerivatives => DerivativeComparison::FILE_NAME,
            Demo::BernoulliEntropy => BernoulliEntropyComparison::FILE_NAME,
            Demo::NegativeXLogX => NegativeXLogXPlot::FILE_NAME,
            Demo::CompareLogBases => LogBaseComparison::FILE_NAME,
            Demo::Exponential => ExponentialFunction::FILE_NAME,
            Demo::CompoundLimit => CompoundLimitPlot::FILE_NAME,
            Demo::CompoundInterest => CompoundInterest::FILE_NAME,
            Demo::SigmoidFunctions => SigmoidFunctions::FILE_NAME,
            Demo::SigmoidSaturation => SigmoidSaturation::FILE_NAME,
            Demo::GradientDescent => GradientDescentMonitor::FILE_NAME
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Demo::Bernoulli => "p^7(1-p)^3 and the binomial probability P(X=7 | n=10, p)",
            Demo::LogBernoulli => "log p^7(1-p)^3 and the binomial log-likelihood",
            Demo::CompareDerivatives => "derivatives of the probability versus the log-probability",
            Demo::BernoulliEntropy => "Bernoulli entropy in bases e, 2 and 10",
            Demo::NegativeXLogX => "f(x) = -x ln(x) and its maximum at 1/e",
            Demo::CompareLogBases => "-x log_b(x) for bases e, 2 and 10",
            Demo::Exponential => "y = e^x with its landmark points",
            Demo::CompoundLimit => "(1 + 1/x)^x approaching e",
            Demo::CompoundInterest => "why e - 2 is the bonus of continuous compounding",
            Demo::SigmoidFunctions => "1/(1+e^-x) next to 1/(1+e^x)",
            Demo::SigmoidSaturation => "sigmoid saturation and vanishing gradients",
            Demo::GradientDescent => "monitored fixed-step gradient descent on e^x - ln(x)"
        }
    }

    pub fn from_name(name: &str) -> Option<Demo> {
        Demo::ALL.into_iter().find(|demo| demo.name() == name)
    }

    pub fn run(&self, context: &RunContext) -> Result<DemoOutput, DemoError> {
        let demo = *self;
        match self {
            Demo::Bernoulli => execute(demo, &BernoulliDistribution::default(), context),
            Demo::LogBernoulli => execute(demo, &LogBernoulli::default(), context),
            Demo::CompareDerivatives => execute(demo, &DerivativeComparison::default(), context),
            Demo::BernoulliEntropy => execute(demo, &BernoulliEntropyComparison::default(), context),
            Demo::NegativeXLogX => execute(demo, &NegativeXLogXPlot::default(), context),
            Demo::CompareLogBases => execute(demo, &LogBaseComparison::default(), context),
            Demo::Exponential => execute(demo, &ExponentialFunction::default(), context),
            Demo::CompoundLimit => execute(demo, &CompoundLimitPlot::default(), context),
            Demo::CompoundInterest => execute(demo, &CompoundInterest::default(), context),
            Demo::SigmoidFunctions => execute(demo, &SigmoidFunctions::default(), context),
            Demo::SigmoidSaturation => execute(demo, &SigmoidSaturation::default(), context),
            Demo::GradientDescent => execute(demo, &GradientDescentMonitor::new(context.descent), context)
        }
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// 圖表共用元件
// ─────────────────────────────────────────────────────────────────────────────

/// 紅點標出極大值，旁邊附上座標文字。
pub(crate) fn annotate_peak(peak: &Extremum, value_name: &str, precision: usize, text_offset: (f64, f64)) -> Vec<crate::chart::figure::Layer> {
    use crate::chart::figure::{
        Layer,
        MarkerShape,
        palette
    };

    let at = (peak.x(), peak.value());
    vec![
        Layer::marker(at, MarkerShape::Circle, palette::RED),
        Layer::dashed(vec![at, (at.0 + text_offset.0, at.1 + text_offset.1)], palette::RED).with_size(1),
        Layer::text(
            (at.0 + text_offset.0, at.1 + text_offset.1),
            format!(
                "Maximum: p={:.3}\n{}={:.prec$}",
                peak.x(),
                value_name,
                peak.value(),
                prec = precision
            )
        )
    ]
}
