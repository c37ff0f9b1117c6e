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
    Demonstration
};
use crate::math::curve::curve::Curve;
use crate::math::curve::logistic::{
    ReversedSigmoid,
    Sigmoid
};
use crate::math::grid::{
    Grid,
    Samples
};

const PROBES: [f64; 3] = [0.0, 1.0, -1.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmoidFunctions {
    lower: f64,
    upper: f64,
    resolution: usize
}

impl Default for SigmoidFunctions {
    fn default() -> Self {
        SigmoidFunctions {
            lower: -10.0,
            upper: 10.0,
            resolution: 1000
        }
    }
}

impl SigmoidFunctions {
    pub const FILE_NAME: &'static str = "sigmoid_functions.png";
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SigmoidProbe {
    x: f64,
    sigmoid: f64,
    reversed: f64
}

impl SigmoidProbe {
    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn sigmoid(&self) -> f64 {
        self.sigmoid
    }

    pub fn reversed(&self) -> f64 {
        self.reversed
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SigmoidFunctionsReport {
    probes: Vec<SigmoidProbe>,
    /// σ(1) + σ(-1) 的另一種寫法，應恰為 1。
    sum_at_one: f64,
    #[serde(skip)]
    sigmoid: Samples,
    #[serde(skip)]
    reversed: Samples
}

impl SigmoidFunctionsReport {
    pub fn probes(&self) -> &[SigmoidProbe] {
        &self.probes
    }

    pub fn sum_at_one(&self) -> f64 {
        self.sum_at_one
    }
}

impl fmt::Display for SigmoidFunctionsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);
        let thin = "-".repeat(60);
        writeln!(f, "{}", rule)?;
        writeln!(f, "Function properties")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Function 1: y = 1/(1+e^-x)")?;
        writeln!(f, "{}", thin)?;
        for probe in &self.probes {
            writeln!(f, "  x = {:>2}: y = {:.4}", probe.x, probe.sigmoid)?;
        }
        writeln!(f, "  x -> +inf: y -> 1")?;
        writeln!(f, "  x -> -inf: y -> 0")?;
        writeln!(f, "  dy/dx = y(1-y)")?;
        writeln!(f, "Function 2: y = 1/(1+e^x)")?;
        writeln!(f, "{}", thin)?;
        for probe in &self.probes {
            writeln!(f, "  x = {:>2}: y = {:.4}", probe.x, probe.reversed)?;
        }
        writeln!(f, "  x -> +inf: y -> 0")?;
        writeln!(f, "  x -> -inf: y -> 1")?;
        writeln!(f, "  dy/dx = -y(1-y)")?;
        writeln!(f, "Relationship:")?;
        writeln!(f, "{}", thin)?;
        writeln!(f, "  the second function mirrors the first about y = 0.5")?;
        writeln!(f, "  1/(1+e^x) = 1 - 1/(1+e^-x)")?;
        write!(f, "  check: sigmoid(1) + reversed(1) = {:.4}", self.sum_at_one)
    }
}

impl Demonstration for SigmoidFunctions {
    type Report = SigmoidFunctionsReport;

    fn analyze(&self) -> Result<Self::Report, DemoError> {
        let grid = Grid::linspace(self.lower, self.upper, self.resolution)?;
        let probes = PROBES
            .iter()
            .map(|&x| SigmoidProbe {
                x,
                sigmoid: Sigmoid.value(x),
                reversed: ReversedSigmoid.value(x)
            })
            .collect();
        Ok(SigmoidFunctionsReport {
            probes,
            sum_at_one: Sigmoid.value(1.0) + ReversedSigmoid.value(1.0),
            sigmoid: Sigmoid.sample(&grid),
            reversed: ReversedSigmoid.sample(&grid)
        })
    }

    fn figure(&self, report: &Self::Report) -> Result<Figure, DemoError> {
        let x_range = self.lower..self.upper;
        let guides = [
            Layer::hline(0.5, palette::RED).with_label("y = 0.5"),
            Layer::vline(0.0, palette::RED).with_label("x = 0")
        ];

        let sigmoid = Panel::new("y = 1/(1+e^-x): Sigmoid", x_range.clone(), -0.1..1.1)
            .axes("x", "y")
            .layer(Layer::curve(&report.sigmoid, palette::BLUE).with_label("y = 1/(1+e^-x)"))
            .layers_from(guides.clone())
            .layer(Layer::text((2.0, 0.8), "x -> +inf, y -> 1"))
            .layer(Layer::text((-7.0, 0.2), "x -> -inf, y -> 0"))
            .layer(Layer::text((0.3, 0.45), "(0, 0.5)\ncenter of symmetry").with_size(11));

        let reversed = Panel::new("y = 1/(1+e^x): Reversed Sigmoid", x_range, -0.1..1.1)
            .axes("x", "y")
            .layer(Layer::curve(&report.reversed, palette::GREEN).with_label("y = 1/(1+e^x)"))
            .layers_from(guides)
            .layer(Layer::text((2.0, 0.2), "x -> +inf, y -> 0"))
            .layer(Layer::text((-7.0, 0.8), "x -> -inf, y -> 1"))
            .layer(Layer::text((-3.5, 0.45), "(0, 0.5)\ncenter of symmetry").with_size(11));

        Ok(Figure::new(Self::FILE_NAME, 1, 2).panel(sigmoid).panel(reversed))
    }
}
