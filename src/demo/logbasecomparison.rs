use std::fmt;

use serde::Serialize;

use crate::chart::figure::{
    Figure,
    Layer,
    Panel,
    palette
};
use crate::demo::bernoullientropy::{
    BASES,
    BaseMaximum
};
use crate::demo::demo::{
    DemoError,
    Demonstration,
    peak_of
};
use crate::math::curve::curve::Curve;
use crate::math::curve::entropy::NegativeXLogX;
use crate::math::grid::{
    Grid,
    Samples
};

/// 不同底數的 -x·log_b(x)：ln(b) 只縮放函數值，極大值點不變。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogBaseComparison {
    lower: f64,
    upper: f64,
    resolution: usize
}

impl Default for LogBaseComparison {
    fn default() -> Self {
        LogBaseComparison {
            lower: 0.001,
            upper: 3.0,
            resolution: 1000
        }
    }
}

impl LogBaseComparison {
    pub const FILE_NAME: &'static str = "compare_log_bases.png";
}

#[derive(Debug, Clone, Serialize)]
pub struct LogBaseComparisonReport {
    maxima: Vec<BaseMaximum>,
    #[serde(skip)]
    curves: Vec<Samples>
}

impl LogBaseComparisonReport {
    pub fn maxima(&self) -> &[BaseMaximum] {
        &self.maxima
    }
}

impl fmt::Display for LogBaseComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);
        writeln!(f, "{}", rule)?;
        writeln!(f, "f(x) = -x * log_b(x) for different bases")?;
        writeln!(f, "{}", rule)?;
        for maximum in &self.maxima {
            writeln!(f, "Base {}:", maximum.base())?;
            writeln!(f, "  maximum {:.4} at x = {:.4}", maximum.max_value(), maximum.argmax())?;
            writeln!(f, "  f(x) = -x * ln(x) / ln({})", maximum.base())?;
        }
        writeln!(f, "{}", rule)?;
        writeln!(f, "Observations:")?;
        writeln!(f, "1. Every base reaches its maximum at x = 1/e")?;
        writeln!(f, "2. The maximum equals 1/(e * ln(b))")?;
        writeln!(f, "3. A larger base gives smaller values")?;
        write!(f, "4. Every curve passes through zero at x = 1")
    }
}

impl Demonstration for LogBaseComparison {
    type Report = LogBaseComparisonReport;

    fn analyze(&self) -> Result<Self::Report, DemoError> {
        let grid = Grid::linspace(self.lower, self.upper, self.resolution)?;
        let mut maxima = Vec::with_capacity(BASES.len());
        let mut curves = Vec::with_capacity(BASES.len());
        for (base, _, _) in BASES {
            let curve = NegativeXLogX::new(base);
            let samples = curve.sample(&grid);
            let sampled = peak_of(&samples, "-x log_b(x)")?;
            maxima.push(BaseMaximum::new(base, curve.argmax(), curve.max_value(), sampled));
            curves.push(samples);
        }
        Ok(LogBaseComparisonReport { maxima, curves })
    }

    fn figure(&self, report: &Self::Report) -> Result<Figure, DemoError> {
        let mut panel = Panel::new("Comparison of f(x) = -x log_b(x) with Different Bases", 0.0..3.0, -1.0..1.0)
            .axes("x", "f(x)")
            .layer(Layer::axis_hline(0.0))
            .layer(Layer::axis_vline(0.0));

        let text_anchors = [(0.15, 0.45), (0.55, 0.38), (1.5, 0.27)];
        for (((maximum, samples), (_, color, shape)), anchor) in
            report.maxima.iter().zip(&report.curves).zip(BASES).zip(text_anchors)
        {
            let at = (maximum.argmax(), maximum.max_value());
            panel = panel
                .layer(Layer::curve(samples, color).with_size(3).with_label(format!("-x log_{}(x)", maximum.base())))
                .layer(
                    Layer::marker(at, shape, color)
                        .with_size(8)
                        .with_label(format!("Max at x = 1/e (base {})", maximum.base()))
                )
                .layer(
                    Layer::text(anchor, format!("Max (base {}): ({:.4}, {:.4})", maximum.base(), at.0, at.1))
                        .with_color(color)
                );
        }
        panel = panel.layer(Layer::vline(1.0, palette::GRAY));
        Ok(Figure::single(Self::FILE_NAME, panel))
    }
}
