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
use crate::math::curve::exponential::CompoundLimit;
use crate::math::grid::{
    Grid,
    Samples
};

const TABLE_POINTS: [f64; 7] = [1.0, 2.0, 5.0, 10.0, 50.0, 100.0, 1000.0];
const HIGHLIGHTED: [f64; 4] = [1.0, 2.0, 5.0, 10.0];

/// (1 + 1/x)^x 的全貌與趨近 e 的細節。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CompoundLimitPlot {
    curve: CompoundLimit
}

impl CompoundLimitPlot {
    pub const FILE_NAME: &'static str = "function_plot.png";
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LimitRow {
    x: f64,
    value: f64,
    gap: f64
}

impl LimitRow {
    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// e - g(x)
    pub fn gap(&self) -> f64 {
        self.gap
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompoundLimitReport {
    limit: f64,
    rows: Vec<LimitRow>,
    #[serde(skip)]
    wide: Samples,
    #[serde(skip)]
    detail: Samples
}

impl CompoundLimitReport {
    pub fn limit(&self) -> f64 {
        self.limit
    }

    pub fn rows(&self) -> &[LimitRow] {
        &self.rows
    }
}

impl fmt::Display for CompoundLimitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(40);
        writeln!(f, "Function values:")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "{:>10} | {:>20}", "x", "y = (1+1/x)^x")?;
        writeln!(f, "{}", rule)?;
        for row in &self.rows {
            writeln!(f, "{:>10} | {:>20.6}", row.x, row.value)?;
        }
        writeln!(f, "{}", rule)?;
        writeln!(f, "{:>10} | {:>20.6} (limit)", "inf", self.limit)?;
        write!(f, "{}", rule)
    }
}

impl Demonstration for CompoundLimitPlot {
    type Report = CompoundLimitReport;

    fn analyze(&self) -> Result<Self::Report, DemoError> {
        let limit = self.curve.limit();
        let rows = TABLE_POINTS
            .iter()
            .map(|&x| {
                let value = self.curve.value(x);
                LimitRow { x, value, gap: limit - value }
            })
            .collect();
        Ok(CompoundLimitReport {
            limit,
            rows,
            wide: self.curve.sample(&Grid::linspace(0.1, 100.0, 1000)?),
            detail: self.curve.sample(&Grid::linspace(1.0, 20.0, 500)?)
        })
    }

    fn figure(&self, report: &Self::Report) -> Result<Figure, DemoError> {
        let limit_label = format!("y = e = {:.4}", report.limit);
        let wide = Panel::new("y = (1 + 1/x)^x for 0.1 <= x <= 100", 0.0..100.0, 1.5..3.5)
            .axes("x", "y")
            .layer(Layer::curve(&report.wide, palette::BLUE).with_label("y = (1 + 1/x)^x"))
            .layer(Layer::hline(report.limit, palette::RED).with_label(limit_label.clone()));

        let mut detail = Panel::new("Detailed view (1 <= x <= 20)", 1.0..20.0, 1.9..2.8)
            .axes("x", "y")
            .layer(Layer::curve(&report.detail, palette::BLUE).with_label("y = (1 + 1/x)^x"))
            .layer(Layer::hline(report.limit, palette::RED).with_label(limit_label));
        for x in HIGHLIGHTED {
            let y = self.curve.value(x);
            detail = detail
                .layer(Layer::marker((x, y), MarkerShape::Circle, palette::RED).with_size(4))
                .layer(Layer::text((x + 0.2, y - 0.02), format!("({}, {:.4})", x, y)).with_size(11));
        }
        Ok(Figure::new(Self::FILE_NAME, 1, 2).panel(wide).panel(detail))
    }
}
