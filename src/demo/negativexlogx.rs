use std::fmt;

use serde::Serialize;

use crate::chart::figure::{
    Figure,
    Layer,
    MarkerShape,
    Panel,
    palette
};
use crate::demo::bernoullientropy::BaseMaximum;
use crate::demo::demo::{
    DemoError,
    Demonstration,
    peak_of
};
use crate::math::curve::curve::Curve;
use crate::math::curve::entropy::{
    LogBase,
    NegativeXLogX
};
use crate::math::grid::{
    Grid,
    Samples
};

/// f(x) = -x·ln(x)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegativeXLogXPlot {
    curve: NegativeXLogX,
    lower: f64,
    upper: f64,
    resolution: usize
}

impl Default for NegativeXLogXPlot {
    fn default() -> Self {
        NegativeXLogXPlot {
            curve: NegativeXLogX::new(LogBase::E),
            lower: 0.001,
            upper: 5.0,
            resolution: 1000
        }
    }
}

impl NegativeXLogXPlot {
    pub const FILE_NAME: &'static str = "negative_x_log_x.png";
}

#[derive(Debug, Clone, Serialize)]
pub struct NegativeXLogXReport {
    maximum: BaseMaximum,
    #[serde(skip)]
    samples: Samples
}

impl NegativeXLogXReport {
    pub fn maximum(&self) -> &BaseMaximum {
        &self.maximum
    }
}

impl fmt::Display for NegativeXLogXReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Maximum value: {:.4} at x = {:.4}",
            self.maximum.max_value(),
            self.maximum.argmax()
        )
    }
}

impl Demonstration for NegativeXLogXPlot {
    type Report = NegativeXLogXReport;

    fn analyze(&self) -> Result<Self::Report, DemoError> {
        let grid = Grid::linspace(self.lower, self.upper, self.resolution)?;
        let samples = self.curve.sample(&grid);
        let sampled = peak_of(&samples, "-x ln(x)")?;
        Ok(NegativeXLogXReport {
            maximum: BaseMaximum::new(self.curve.base(), self.curve.argmax(), self.curve.max_value(), sampled),
            samples
        })
    }

    fn figure(&self, report: &Self::Report) -> Result<Figure, DemoError> {
        let at = (report.maximum.argmax(), report.maximum.max_value());
        let panel = Panel::new("Plot of f(x) = -x log(x)", 0.0..5.0, -2.0..1.0)
            .axes("x", "f(x)")
            .layer(Layer::axis_hline(0.0))
            .layer(Layer::axis_vline(0.0))
            .layer(Layer::curve(&report.samples, palette::BLUE).with_label("f(x) = -x log(x)"))
            .layer(
                Layer::marker(at, MarkerShape::Circle, palette::RED)
                    .with_size(6)
                    .with_label("Maximum at x = 1/e")
            );
        Ok(Figure::single(Self::FILE_NAME, panel))
    }
}
