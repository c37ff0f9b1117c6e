use std::f64::consts::E;
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
use crate::interestrate::compounding::Compounding;
use crate::math::curve::curve::{
    Curve,
    CurveIntegration
};
use crate::math::curve::exponential::{
    CompoundLimit,
    Exponential
};
use crate::math::grid::{
    Grid,
    Samples
};
use crate::math::series::{
    TaylorTerm,
    cumulative_sums,
    exp_taylor_terms
};

const FREQUENCIES: [Compounding; 8] = [
    Compounding::Annual,
    Compounding::Semiannual,
    Compounding::Quarterly,
    Compounding::Monthly,
    Compounding::Weekly,
    Compounding::Daily,
    Compounding::Hourly,
    Compounding::EveryMinute
];

// ─────────────────────────────────────────────────────────────────────────────
// CompoundInterest
// ─────────────────────────────────────────────────────────────────────────────
//
// 本金 1、年利率 100%、期間一年。
//
//   單利        1 + r·τ          = 2
//   連續複利    e^(r·τ)          = e
//   差額        e - 2 = Σ_{k≥2} 1/k! = ∫₀¹ (e^x - 1) dx

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompoundInterest {
    rate: f64,
    tau: f64,
    taylor_terms: usize,
    integral_resolution: usize
}

impl Default for CompoundInterest {
    fn default() -> Self {
        CompoundInterest {
            rate: 1.0,
            tau: 1.0,
            taylor_terms: 7,
            integral_resolution: 1001
        }
    }
}

impl CompoundInterest {
    pub const FILE_NAME: &'static str = "compound_interest_explanation.png";
}

/// 某一結算頻率下的本利和。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompoundingRow {
    compounding: Compounding,
    periods: f64,
    amount: f64,
    continuous_rate: f64
}

impl CompoundingRow {
    pub fn compounding(&self) -> Compounding {
        self.compounding
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// 達到相同本利和所需的連續複利利率。
    pub fn continuous_rate(&self) -> f64 {
        self.continuous_rate
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompoundInterestReport {
    simple: f64,
    continuous: f64,
    bonus: f64,
    rows: Vec<CompoundingRow>,
    taylor_terms: Vec<TaylorTerm>,
    taylor_partial_sums: Vec<f64>,
    integral_trapezoid: f64,
    integral_exact: f64,
    #[serde(skip)]
    approach: Samples,
    #[serde(skip)]
    growth: Samples
}

impl CompoundInterestReport {
    pub fn simple(&self) -> f64 {
        self.simple
    }

    pub fn continuous(&self) -> f64 {
        self.continuous
    }

    pub fn bonus(&self) -> f64 {
        self.bonus
    }

    pub fn rows(&self) -> &[CompoundingRow] {
        &self.rows
    }

    pub fn taylor_terms(&self) -> &[TaylorTerm] {
        &self.taylor_terms
    }

    pub fn taylor_partial_sums(&self) -> &[f64] {
        &self.taylor_partial_sums
    }

    pub fn integral_trapezoid(&self) -> f64 {
        self.integral_trapezoid
    }

    pub fn integral_exact(&self) -> f64 {
        self.integral_exact
    }
}

impl fmt::Display for CompoundInterestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(70);
        writeln!(f, "{}", rule)?;
        writeln!(f, "What e - 2 = {:.5} means", self.bonus)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Compound interest:")?;
        writeln!(f, "  principal: $1")?;
        writeln!(f, "  annual rate: 100%")?;
        writeln!(f, "  simple interest (settled once): ${:.6}", self.simple)?;
        writeln!(f, "  continuous compounding: ${:.6}", self.continuous)?;
        writeln!(f, "  difference (compounding bonus): ${:.6}", self.bonus)?;
        writeln!(f, "By settlement frequency:")?;
        for row in &self.rows {
            writeln!(
                f,
                "  {:<13} n = {:>7} -> ${:.6} (continuous rate {:.4}%)",
                row.compounding.label(),
                row.periods,
                row.amount,
                row.continuous_rate * 100.0
            )?;
        }
        writeln!(f, "Method 1, Taylor series:")?;
        writeln!(f, "  e - 2 = 1/2! + 1/3! + 1/4! + ... = {:.6}", self.bonus)?;
        for (term, partial) in self.taylor_terms.iter().zip(&self.taylor_partial_sums) {
            writeln!(f, "    {:<5} = {:.6}  (running total {:.6})", term.label(), term.value(), partial)?;
        }
        writeln!(f, "Method 2, limit:")?;
        writeln!(f, "  e - 2 = lim(n->inf) [(1 + 1/n)^n - 2]")?;
        writeln!(f, "Method 3, integral:")?;
        writeln!(f, "  e - 2 = int_0^1 (e^x - 1) dx = {:.6}", self.integral_exact)?;
        writeln!(f, "  trapezoid rule: {:.6}", self.integral_trapezoid)?;
        write!(f, "{}", rule)
    }
}

impl Demonstration for CompoundInterest {
    type Report = CompoundInterestReport;

    fn analyze(&self) -> Result<Self::Report, DemoError> {
        let simple = Compounding::Simple.future_value(self.rate, self.tau);
        let continuous = Compounding::Continuous.future_value(self.rate, self.tau);
        let rows = FREQUENCIES
            .iter()
            .filter_map(|&compounding| {
                let periods = compounding.frequency()?;
                let amount = compounding.future_value(self.rate, self.tau);
                Some(CompoundingRow {
                    compounding,
                    periods,
                    amount,
                    continuous_rate: Compounding::Continuous.implied_rate(amount, self.tau)
                })
            })
            .collect();

        let taylor_terms = exp_taylor_terms(2, self.taylor_terms);
        let values: Vec<f64> = taylor_terms.iter().map(TaylorTerm::value).collect();
        let taylor_partial_sums = cumulative_sums(&values);

        let unit = Grid::linspace(0.0, 1.0, self.integral_resolution)?;
        let integral_trapezoid = unit.evaluate(|x| Exponential.value(x) - 1.0).trapezoid();

        Ok(CompoundInterestReport {
            simple,
            continuous,
            bonus: continuous - simple,
            rows,
            taylor_terms,
            taylor_partial_sums,
            integral_trapezoid,
            integral_exact: Exponential.integral(0.0, 1.0) - 1.0,
            approach: CompoundLimit.sample(&Grid::linspace(1.0, 100.0, 1000)?),
            growth: Exponential.sample(&Grid::linspace(0.0, 1.0, 100)?)
        })
    }

    fn figure(&self, report: &Self::Report) -> Result<Figure, DemoError> {
        let e_label = format!("e = {:.6}", E);

        let categories = report.rows.iter().map(|row| row.compounding.label().to_owned()).collect();
        let amounts: Vec<f64> = report.rows.iter().map(|row| row.amount).collect();
        let frequency_panel = Panel::categorical("Compound Interest: More Frequent = Higher Return", categories, 0.0..3.0)
            .axes("Compounding Frequency", "Final Amount ($1 at 100% APR)")
            .layer(Layer::bars(amounts.clone(), vec![palette::SKY_BLUE; amounts.len()]))
            .layer(Layer::hline(report.continuous, palette::RED).with_label(e_label.clone()))
            .layer(Layer::hline(report.simple, palette::GREEN).with_label("Simple interest = 2"))
            .layer(Layer::text((1.0, 2.5), format!("e - 2 = {:.6}", report.bonus)));

        let approach_x: Vec<f64> = report.approach.x().iter().copied().collect();
        let approach_panel = Panel::new("How (1 + 1/x)^x Approaches e", 0.0..100.0, 1.8..2.9)
            .axes("x (Number of compounding periods)", "Amount")
            .layer(
                Layer::band(
                    approach_x.iter().map(|&x| (x, report.simple)).collect(),
                    approach_x.iter().map(|&x| (x, report.continuous)).collect(),
                    palette::RED
                )
                .with_label("Compound Interest Bonus")
            )
            .layer(Layer::curve(&report.approach, palette::BLUE).with_label("y = (1 + 1/x)^x"))
            .layer(Layer::hline(report.continuous, palette::RED).with_label(e_label))
            .layer(Layer::hline(report.simple, palette::GREEN).with_label("Simple Interest = 2"));

        let term_labels = report.taylor_terms.iter().map(TaylorTerm::label).collect();
        let term_values: Vec<f64> = report.taylor_terms.iter().map(TaylorTerm::value).collect();
        let partial_points: Vec<(f64, f64)> = report
            .taylor_partial_sums
            .iter()
            .enumerate()
            .map(|(i, &sum)| (i as f64, sum))
            .collect();
        let mut taylor_panel = Panel::categorical("Taylor Series: e - 2 = 1/2! + 1/3! + 1/4! + ...", term_labels, 0.0..0.8)
            .axes("Terms in Taylor Series", "Contribution to e - 2")
            .layer(Layer::bars(
                term_values.clone(),
                palette::gradient(palette::ORANGE, palette::DARK_RED, term_values.len())
            ))
            .layer(Layer::line(partial_points.clone(), palette::RED).with_label("Cumulative Sum"))
            .layer(Layer::scatter(partial_points, vec![palette::RED; term_values.len()]).with_size(5))
            .layer(Layer::hline(report.bonus, palette::BLUE).with_label(format!("Total = e - 2 = {:.6}", report.bonus)));
        for (i, value) in term_values.iter().enumerate() {
            taylor_panel = taylor_panel
                .layer(Layer::text((i as f64 - 0.3, value + 0.03), format!("{:.4}", value)).with_size(10));
        }

        let simple_line: Vec<(f64, f64)> = report.growth.x().iter().map(|&t| (t, 1.0 + t)).collect();
        let growth_panel = Panel::new("Continuous vs Simple Interest Growth", 0.0..1.0, 1.0..3.0)
            .axes("Time (years)", "Amount ($1 at 100% APR)")
            .layer(
                Layer::band(simple_line.clone(), report.growth.pairs(), palette::RED)
                    .with_label(format!("Bonus: e^t - (1+t) = {:.4}", report.bonus))
            )
            .layer(
                Layer::curve(&report.growth, palette::BLUE)
                    .with_size(3)
                    .with_label(format!("Continuous: e^t (final = {:.4})", report.continuous))
            )
            .layer(
                Layer::dashed(simple_line, palette::ORANGE)
                    .with_size(3)
                    .with_label("Simple Interest: 1 + t (final = 2)")
            );

        Ok(Figure::new(Self::FILE_NAME, 2, 2)
            .titled("Why Is e - 2 the Bonus of Continuous Compounding?")
            .panel(frequency_panel)
            .panel(approach_panel)
            .panel(taylor_panel)
            .panel(growth_panel))
    }
}
