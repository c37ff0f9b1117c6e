use std::f64::consts::E;
use std::fmt;

use serde::Serialize;

use crate::chart::figure::{
    Figure,
    Layer,
    MarkerShape,
    Panel,
    palette
};
use crate::demo::demo::{
    DemoError,
    Demonstration
};
use crate::math::curve::curve::Curve;
use crate::math::curve::exponential::Exponential;
use crate::math::grid::{
    Grid,
    Samples
};

/// y = e^x 上標註的點。
#[derive(Debug, Clone, Serialize)]
pub struct Landmark {
    label: String,
    x: f64,
    y: f64
}

impl Landmark {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialFunction {
    lower: f64,
    upper: f64,
    resolution: usize
}

impl Default for ExponentialFunction {
    fn default() -> Self {
        ExponentialFunction {
            lower: -3.0,
            upper: 3.0,
            resolution: 400
        }
    }
}

impl ExponentialFunction {
    pub const FILE_NAME: &'static str = "exponential_function.png";
}

#[derive(Debug, Clone, Serialize)]
pub struct ExponentialReport {
    landmarks: Vec<Landmark>,
    #[serde(skip)]
    samples: Samples
}

impl ExponentialReport {
    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }
}

impl fmt::Display for ExponentialReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "y = e^x on [{}, {}]", self.samples.x()[0], self.samples.x()[self.samples.len() - 1])?;
        let mut first = true;
        for landmark in &self.landmarks {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "  {:<10} x = {:>5.2}, y = {:.6}", landmark.label, landmark.x, landmark.y)?;
        }
        Ok(())
    }
}

impl Demonstration for ExponentialFunction {
    type Report = ExponentialReport;

    fn analyze(&self) -> Result<Self::Report, DemoError> {
        let grid = Grid::linspace(self.lower, self.upper, self.resolution)?;
        let landmark = |label: String, x: f64| Landmark {
            label,
            x,
            y: Exponential.value(x)
        };
        Ok(ExponentialReport {
            landmarks: vec![
                landmark("(0, 1)".to_owned(), 0.0),
                landmark(format!("(1, {:.2})", E), 1.0),
                landmark("(-1, 1/e)".to_owned(), -1.0)
            ],
            samples: Exponential.sample(&grid)
        })
    }

    fn figure(&self, report: &Self::Report) -> Result<Figure, DemoError> {
        let text_offsets = [(0.5, 1.0), (0.5, 1.3), (-1.5, 0.6)];
        let mut panel = Panel::new("Exponential function y = e^x", self.lower..self.upper, -0.5..20.0)
            .axes("x", "y")
            .layer(Layer::axis_hline(0.0))
            .layer(Layer::axis_vline(0.0))
            .layer(Layer::curve(&report.samples, palette::BLUE).with_label("y = e^x"));
        for (landmark, (dx, dy)) in report.landmarks.iter().zip(text_offsets) {
            let at = (landmark.x, landmark.y);
            let label_at = (at.0 + dx, at.1 + dy);
            panel = panel
                .layer(Layer::marker(at, MarkerShape::Circle, palette::RED))
                .layer(Layer::line(vec![label_at, at], palette::BLACK).with_size(1))
                .layer(Layer::text(label_at, landmark.label.clone()));
        }
        Ok(Figure::single(Self::FILE_NAME, panel))
    }
}
