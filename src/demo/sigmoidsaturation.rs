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
    Demonstration,
    peak_of
};
use crate::math::curve::curve::Curve;
use crate::math::curve::logistic::{
    Activity,
    SATURATION_THRESHOLD,
    Sigmoid
};
use crate::math::grid::{
    Extremum,
    Grid,
    Samples
};

const TEST_POINTS: [f64; 11] = [-10.0, -5.0, -3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 5.0, 10.0];

/// |x| 超過此值的區間在圖上標成飽和區。
const SATURATED_BEYOND: f64 = 5.0;

// ─────────────────────────────────────────────────────────────────────────────
// SigmoidSaturation
// ─────────────────────────────────────────────────────────────────────────────
//
// σ'(x) = σ(x)·(1 - σ(x)) 最大只有 0.25，|x| 稍大就趨近 0（梯度消失）。

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmoidSaturation {
    lower: f64,
    upper: f64,
    resolution: usize,
    threshold: f64
}

impl Default for SigmoidSaturation {
    fn default() -> Self {
        SigmoidSaturation {
            lower: -10.0,
            upper: 10.0,
            resolution: 1000,
            threshold: SATURATION_THRESHOLD
        }
    }
}

impl SigmoidSaturation {
    pub const FILE_NAME: &'static str = "sigmoid_saturation_problem.png";
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SaturationProbe {
    x: f64,
    value: f64,
    gradient: f64,
    activity: Activity
}

impl SaturationProbe {
    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn gradient(&self) -> f64 {
        self.gradient
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SigmoidSaturationReport {
    threshold: f64,
    max_gradient: Extremum,
    probes: Vec<SaturationProbe>,
    #[serde(skip)]
    value: Samples,
    #[serde(skip)]
    gradient: Samples
}

impl SigmoidSaturationReport {
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn max_gradient(&self) -> &Extremum {
        &self.max_gradient
    }

    pub fn probes(&self) -> &[SaturationProbe] {
        &self.probes
    }
}

impl fmt::Display for SigmoidSaturationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(80);
        let thin = "-".repeat(80);
        writeln!(f, "{}", rule)?;
        writeln!(f, "Sigmoid saturation")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "1. Values and gradients:")?;
        writeln!(f, "{}", thin)?;
        for probe in &self.probes {
            let status = match probe.activity {
                Activity::Active => "active",
                Activity::Saturated => "saturated"
            };
            writeln!(
                f,
                "  x = {:>3}: sigma(x) = {:.6},  sigma'(x) = {:.6}  {}",
                probe.x, probe.value, probe.gradient, status
            )?;
        }
        writeln!(f, "2. Observations:")?;
        writeln!(f, "{}", thin)?;
        writeln!(
            f,
            "  sampled maximum gradient {:.4} at x = {:.2} (exact 0.25 at x = 0)",
            self.max_gradient.value(),
            self.max_gradient.x()
        )?;
        writeln!(f, "  for |x| > 5 the output sits close to 0 or 1")?;
        writeln!(
            f,
            "  a gradient below {} counts as vanished and stalls learning",
            self.threshold
        )?;
        writeln!(f, "3. Remedies:")?;
        writeln!(f, "{}", thin)?;
        writeln!(f, "  ReLU f(x) = max(0, x) keeps a gradient of 0 or 1")?;
        writeln!(f, "  Leaky ReLU allows a small negative slope")?;
        write!(f, "  ELU, SELU and GELU are common modern alternatives")
    }
}

impl Demonstration for SigmoidSaturation {
    type Report = SigmoidSaturationReport;

    fn analyze(&self) -> Result<Self::Report, DemoError> {
        let grid = Grid::linspace(self.lower, self.upper, self.resolution)?;
        let gradient = Sigmoid.sample_derivative(&grid);
        let probes = TEST_POINTS
            .iter()
            .map(|&x| SaturationProbe {
                x,
                value: Sigmoid.value(x),
                gradient: Sigmoid.derivative(x),
                activity: Sigmoid.activity(x, self.threshold)
            })
            .collect();
        Ok(SigmoidSaturationReport {
            threshold: self.threshold,
            max_gradient: peak_of(&gradient, "sigmoid derivative")?,
            probes,
            value: Sigmoid.sample(&grid),
            gradient
        })
    }

    fn figure(&self, report: &Self::Report) -> Result<Figure, DemoError> {
        let x_range = self.lower..self.upper;
        let saturated = [
            Layer::span(SATURATED_BEYOND, self.upper, palette::RED),
            Layer::span(self.lower, -SATURATED_BEYOND, palette::RED)
        ];

        let value_panel = Panel::new("Sigmoid Function", x_range.clone(), -0.1..1.1)
            .axes("x", "sigma(x)")
            .layers_from(saturated.clone())
            .layer(Layer::curve(&report.value, palette::BLUE).with_label("sigma(x) = 1/(1+e^-x)"))
            .layer(Layer::hline(0.5, palette::RED))
            .layer(Layer::vline(0.0, palette::RED))
            .layer(Layer::text((6.2, 0.55), "Saturated\n(Gradient ~ 0)").with_color(palette::DARK_RED))
            .layer(Layer::text((-9.0, 0.55), "Saturated\n(Gradient ~ 0)").with_color(palette::DARK_RED))
            .layer(Layer::text((-1.8, 0.25), "Active Region\n(Large Gradient)").with_color(palette::GREEN));

        let peak = (report.max_gradient.x(), report.max_gradient.value());
        let gradient_panel = Panel::new("Sigmoid Derivative (Gradient)", x_range, -0.05..0.3)
            .axes("x", "sigma'(x)")
            .layers_from(saturated)
            .layer(Layer::curve(&report.gradient, palette::GREEN).with_label("sigma'(x) = sigma(x)(1-sigma(x))"))
            .layer(Layer::hline(0.0, palette::RED))
            .layer(Layer::vline(0.0, palette::RED))
            .layer(Layer::marker(peak, MarkerShape::Cross, palette::RED).with_size(8))
            .layer(Layer::text(
                (peak.0 - 2.5, peak.1 + 0.04),
                format!("Max gradient = {:.4}\n at x = {:.2}", peak.1, peak.0)
            ))
            .layer(Layer::text((6.2, 0.08), "Vanishing\nGradient").with_color(palette::DARK_RED).with_size(11));

        let categories: Vec<String> = report.probes.iter().map(|probe| format!("{}", probe.x)).collect();

        let values: Vec<f64> = report.probes.iter().map(|probe| probe.value).collect();
        let value_colors = report
            .probes
            .iter()
            .map(|probe| {
                if probe.x.abs() > SATURATED_BEYOND {
                    palette::RED
                } else {
                    palette::GREEN
                }
            })
            .collect();
        let mut value_bars = Panel::categorical("Sigmoid Values at Different x", categories.clone(), 0.0..1.25)
            .axes("x", "sigma(x)")
            .layer(Layer::bars(values, value_colors))
            .layer(Layer::hline(0.5, palette::RED));
        for (i, probe) in report.probes.iter().enumerate() {
            if probe.x.abs() <= 3.0 {
                value_bars = value_bars.layer(
                    Layer::text(
                        (i as f64 - 0.4, probe.value + 0.12),
                        format!("{:.3}\ngrad={:.3}", probe.value, probe.gradient)
                    )
                    .with_size(9)
                );
            }
        }

        let gradients: Vec<f64> = report.probes.iter().map(|probe| probe.gradient).collect();
        let gradient_colors = report
            .probes
            .iter()
            .map(|probe| match probe.activity {
                Activity::Active => palette::GREEN,
                Activity::Saturated => palette::RED
            })
            .collect();
        let mut gradient_bars = Panel::categorical("Gradient Values at Different x", categories, 0.0..0.3)
            .axes("x", "sigma'(x)")
            .layer(Layer::bars(gradients, gradient_colors))
            .layer(
                Layer::hline(report.threshold, palette::ORANGE)
                    .with_label(format!("Threshold = {}", report.threshold))
            );
        for (i, probe) in report.probes.iter().enumerate() {
            let text = match probe.activity {
                Activity::Active => Layer::text((i as f64 - 0.4, probe.gradient + 0.015), format!("{:.4}", probe.gradient)),
                Activity::Saturated => Layer::text((i as f64 - 0.2, 0.015), "~0").with_color(palette::RED)
            };
            gradient_bars = gradient_bars.layer(text.with_size(9));
        }

        Ok(Figure::new(Self::FILE_NAME, 2, 2)
            .panel(value_panel)
            .panel(gradient_panel)
            .panel(value_bars)
            .panel(gradient_bars))
    }
}
