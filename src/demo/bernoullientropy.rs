use std::fmt;

use plotters::style::RGBColor;
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
use crate::math::curve::entropy::{
    BernoulliEntropy,
    LogBase
};
use crate::math::grid::{
    Extremum,
    Grid,
    Samples
};

/// 三種常用底數與其繪圖樣式。
pub(crate) const BASES: [(LogBase, RGBColor, MarkerShape); 3] = [
    (LogBase::E, palette::BLUE, MarkerShape::Circle),
    (LogBase::Two, palette::RED, MarkerShape::Square),
    (LogBase::Ten, palette::GREEN, MarkerShape::Triangle)
];

/// 某一底數下的解析極大值與取樣極大值。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BaseMaximum {
    base: LogBase,
    unit: &'static str,
    argmax: f64,
    max_value: f64,
    sampled: Extremum
}

impl BaseMaximum {
    pub(crate) fn new(base: LogBase, argmax: f64, max_value: f64, sampled: Extremum) -> BaseMaximum {
        BaseMaximum {
            base,
            unit: base.unit(),
            argmax,
            max_value,
            sampled
        }
    }

    pub fn base(&self) -> LogBase {
        self.base
    }

    pub fn argmax(&self) -> f64 {
        self.argmax
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    pub fn sampled(&self) -> &Extremum {
        &self.sampled
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BernoulliEntropyComparison {
    lower: f64,
    upper: f64,
    resolution: usize
}

impl Default for BernoulliEntropyComparison {
    fn default() -> Self {
        BernoulliEntropyComparison {
            lower: 0.001,
            upper: 0.999,
            resolution: 1000
        }
    }
}

impl BernoulliEntropyComparison {
    pub const FILE_NAME: &'static str = "bernoulli_entropy.png";
}

#[derive(Debug, Clone, Serialize)]
pub struct BernoulliEntropyReport {
    maxima: Vec<BaseMaximum>,
    #[serde(skip)]
    curves: Vec<Samples>
}

impl BernoulliEntropyReport {
    pub fn maxima(&self) -> &[BaseMaximum] {
        &self.maxima
    }
}

impl fmt::Display for BernoulliEntropyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(70);
        writeln!(f, "{}", rule)?;
        writeln!(f, "Bernoulli entropy: H(p) = -p*log_b(p) - (1-p)*log_b(1-p)")?;
        writeln!(f, "{}", rule)?;
        for maximum in &self.maxima {
            writeln!(f, "Base {} ({}):", maximum.base, maximum.unit)?;
            writeln!(f, "  maximum {:.4} at p = {}", maximum.max_value, maximum.argmax)?;
            writeln!(
                f,
                "  sampled maximum {:.4} at p = {:.4}",
                maximum.sampled.value(),
                maximum.sampled.x()
            )?;
        }
        writeln!(f, "{}", rule)?;
        writeln!(f, "Observations:")?;
        writeln!(f, "1. Every base reaches its maximum at p = 0.5")?;
        writeln!(f, "2. Uncertainty is largest when both outcomes are equally likely")?;
        writeln!(f, "3. H(p) -> 0 as p -> 0 or p -> 1")?;
        writeln!(f, "4. H is symmetric about p = 0.5")?;
        write!(f, "5. A larger base gives smaller entropy values, since ln(b) divides")
    }
}

impl Demonstration for BernoulliEntropyComparison {
    type Report = BernoulliEntropyReport;

    fn analyze(&self) -> Result<Self::Report, DemoError> {
        let grid = Grid::linspace(self.lower, self.upper, self.resolution)?;
        let mut maxima = Vec::with_capacity(BASES.len());
        let mut curves = Vec::with_capacity(BASES.len());
        for (base, _, _) in BASES {
            let entropy = BernoulliEntropy::new(base);
            let samples = entropy.sample(&grid);
            let sampled = peak_of(&samples, "Bernoulli entropy")?;
            maxima.push(BaseMaximum::new(base, entropy.argmax(), entropy.max_value(), sampled));
            curves.push(samples);
        }
        Ok(BernoulliEntropyReport { maxima, curves })
    }

    fn figure(&self, report: &Self::Report) -> Result<Figure, DemoError> {
        let top = report
            .maxima
            .iter()
            .map(|maximum| maximum.max_value)
            .fold(0.0, f64::max)
            * 1.1;
        let mut panel = Panel::new("Bernoulli Entropy: H(p) = -p log_b(p) - (1-p) log_b(1-p)", 0.0..1.0, 0.0..top)
            .axes("Probability p", "Entropy H(p)")
            .layer(Layer::vline(0.5, palette::GRAY));

        let shrink = [0.92, 0.85, 0.78];
        for (((maximum, samples), (_, color, shape)), factor) in
            report.maxima.iter().zip(&report.curves).zip(BASES).zip(shrink)
        {
            panel = panel
                .layer(Layer::curve(samples, color).with_size(3).with_label(format!("H(p), base {}", maximum.base)))
                .layer(
                    Layer::marker((maximum.argmax, maximum.max_value), shape, color)
                        .with_size(8)
                        .with_label(format!("Max at p = 0.5 (base {})", maximum.base))
                )
                .layer(
                    Layer::text(
                        (0.08, maximum.max_value * factor),
                        format!("Max (base {}): {:.4}", maximum.base, maximum.max_value)
                    )
                    .with_color(color)
                );
        }

        if let Some(natural) = report.maxima.first() {
            panel = panel.layer(
                Layer::text((0.65, natural.max_value * 0.7), "Symmetric about p=0.5\nMaximum uncertainty")
                    .with_color(palette::GRAY)
            );
        }
        Ok(Figure::single(Self::FILE_NAME, panel))
    }
}
