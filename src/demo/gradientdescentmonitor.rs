use std::fmt;

use serde::Serialize;

use crate::chart::figure::{
    Figure,
    Layer,
    MarkerShape,
    Panel,
    fit_log_range,
    fit_range,
    palette
};
use crate::demo::demo::{
    DemoError,
    Demonstration
};
use crate::math::curve::curve::Curve;
use crate::math::grid::Grid;
use crate::optimize::fixedstepdescent::{
    DescentHistory,
    DescentSettings,
    FixedStepDescent,
    Termination
};
use crate::optimize::objective::ExpMinusLog;

/// 對 f(x) = e^x - ln(x) 做固定步長梯度下降，並記錄每一步。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GradientDescentMonitor {
    settings: DescentSettings
}

impl GradientDescentMonitor {
    pub const FILE_NAME: &'static str = "gradient_descent_monitoring.png";

    pub fn new(settings: DescentSettings) -> GradientDescentMonitor {
        GradientDescentMonitor { settings }
    }

    pub fn settings(&self) -> &DescentSettings {
        &self.settings
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GradientDescentReport {
    settings: DescentSettings,
    x: f64,
    loss: f64,
    gradient: f64,
    termination: Termination,
    iterations: usize,
    /// 與解析極小值點 W(1) 的距離
    error: f64,
    history: DescentHistory
}

impl GradientDescentReport {
    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn loss(&self) -> f64 {
        self.loss
    }

    pub fn gradient(&self) -> f64 {
        self.gradient
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn error(&self) -> f64 {
        self.error
    }

    pub fn history(&self) -> &DescentHistory {
        &self.history
    }
}

impl fmt::Display for GradientDescentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.termination {
            Termination::Converged { iteration } => writeln!(f, "Converged at iteration {}", iteration)?,
            Termination::IterationLimit => {
                writeln!(f, "Stopped after {} iterations without converging", self.settings.max_iter)?
            }
            Termination::LeftDomain { iteration, rejected_x } => writeln!(
                f,
                "Warning: step {} would move x to {:.6}, outside x > 0; training stopped",
                iteration, rejected_x
            )?
        }
        writeln!(f, "Optimal solution: x = {:.6}", self.x)?;
        writeln!(f, "Minimum value: f(x) = {:.6}", self.loss)?;
        writeln!(f, "Final gradient: f'(x) = {:.6}", self.gradient)?;
        write!(
            f,
            "Distance to the exact minimizer {:.6}: {:.2e}",
            ExpMinusLog::MINIMIZER,
            self.error
        )
    }
}

impl Demonstration for GradientDescentMonitor {
    type Report = GradientDescentReport;

    fn analyze(&self) -> Result<Self::Report, DemoError> {
        let descent = FixedStepDescent::new(self.settings)?;
        let outcome = descent.minimize(&ExpMinusLog)?;
        let x = outcome.x();
        Ok(GradientDescentReport {
            settings: self.settings,
            x,
            loss: ExpMinusLog.value(x),
            gradient: ExpMinusLog.derivative(x),
            termination: outcome.termination(),
            iterations: outcome.history().len(),
            error: (x - ExpMinusLog::MINIMIZER).abs(),
            history: outcome.history().clone()
        })
    }

    fn figure(&self, report: &Self::Report) -> Result<Figure, DemoError> {
        let history = &report.history;
        let last_iteration = history.len().saturating_sub(1).max(1) as f64;
        let by_iteration = |values: &[f64]| -> Vec<(f64, f64)> {
            values.iter().enumerate().map(|(i, &v)| (i as f64, v)).collect()
        };

        let loss_range = fit_log_range(history.losses().iter().copied(), 0.01, 1.0..10.0);
        let loss_panel = Panel::new("Loss Curve", 0.0..last_iteration, loss_range)
            .log_scale_y()
            .axes("Iteration", "Loss (f(x))")
            .layer(Layer::line(by_iteration(history.losses()), palette::BLUE));

        let gradient_range = fit_range(history.gradients().iter().copied().chain([0.0]), 0.05, -1.0..1.0);
        let gradient_panel = Panel::new("Gradient Curve", 0.0..last_iteration, gradient_range)
            .axes("Iteration", "Gradient (df/dx)")
            .layer(Layer::line(by_iteration(history.gradients()), palette::BLUE).with_label("Gradient"))
            .layer(Layer::hline(0.0, palette::RED).with_label("Zero"));

        let trajectory_range = fit_range(history.iterates().iter().copied().chain([report.x]), 0.05, 0.0..1.0);
        let trajectory_panel = Panel::new("Parameter Trajectory", 0.0..last_iteration, trajectory_range)
            .axes("Iteration", "x value")
            .layer(Layer::line(by_iteration(history.iterates()), palette::BLUE))
            .layer(Layer::hline(report.x, palette::RED).with_label(format!("Optimal x={:.4}", report.x)));

        let curve = ExpMinusLog.sample(&Grid::linspace(0.1, 2.0, 100)?);
        let path: Vec<(f64, f64)> = history
            .iterates()
            .iter()
            .map(|&x| (x, ExpMinusLog.value(x)))
            .collect();
        let path_colors = palette::gradient(palette::NAVY, palette::YELLOW, path.len());
        let visual_range = fit_range(curve.y().iter().copied().chain(path.iter().map(|&(_, y)| y)), 0.05, 0.0..8.0);
        let optimization_panel = Panel::new("Optimization Visualization", 0.0..2.1, visual_range)
            .axes("x", "f(x)")
            .layer(Layer::curve(&curve, palette::BLUE).with_label("f(x) = e^x - log(x)"))
            .layer(Layer::scatter(path, path_colors).with_label("Optimization Path"))
            .layer(
                Layer::marker((report.x, report.loss), MarkerShape::Cross, palette::RED)
                    .with_size(8)
                    .with_label("Minimum")
            );

        Ok(Figure::new(Self::FILE_NAME, 2, 2)
            .titled("Gradient Descent on f(x) = e^x - ln(x)")
            .panel(loss_panel)
            .panel(gradient_panel)
            .panel(trajectory_panel)
            .panel(optimization_panel))
    }
}
