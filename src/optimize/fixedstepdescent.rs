use argmin::core::{
    CostFunction,
    Gradient
};
use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;
use tracing::{
    debug,
    info,
    warn
};

use crate::math::curve::curve::Curve;

// ─────────────────────────────────────────────────────────────────────────────
// DescentError
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq)]
pub enum DescentError {
    #[error("learning rate must be positive and finite, got {0}")]
    InvalidLearningRate(f64),

    #[error("tolerance must be positive, got {0}")]
    InvalidTolerance(f64),

    #[error("iteration budget must be at least one")]
    NoIterations,

    #[error("starting point {0} lies outside the objective domain")]
    StartOutsideDomain(f64),

    #[error("objective evaluation failed: {0}")]
    Objective(String)
}

// ─────────────────────────────────────────────────────────────────────────────
// DescentSettings
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescentSettings {
    pub initial_x: f64,
    pub learning_rate: f64,
    pub max_iter: usize,
    pub tolerance: f64
}

impl Default for DescentSettings {
    fn default() -> Self {
        DescentSettings {
            initial_x: 0.5,
            learning_rate: 0.01,
            max_iter: 1000,
            tolerance: 1e-6
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Termination / DescentHistory / DescentOutcome
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Termination {
    /// |f'(x)| < tolerance 於第 `iteration` 次迭代
    Converged { iteration: usize },
    IterationLimit,
    /// 下一步 `rejected_x` 落在定義域外，該步未被採用
    LeftDomain { iteration: usize, rejected_x: f64 }
}

/// 每次迭代記錄的 f(x)、f'(x)、x，三者長度一致。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DescentHistory {
    losses: Vec<f64>,
    gradients: Vec<f64>,
    iterates: Vec<f64>
}

impl DescentHistory {
    fn record(&mut self, loss: f64, gradient: f64, x: f64) {
        self.losses.push(loss);
        self.gradients.push(gradient);
        self.iterates.push(x);
    }

    pub fn losses(&self) -> &[f64] {
        &self.losses
    }

    pub fn gradients(&self) -> &[f64] {
        &self.gradients
    }

    pub fn iterates(&self) -> &[f64] {
        &self.iterates
    }

    pub fn len(&self) -> usize {
        self.iterates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.iterates.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescentOutcome {
    x: f64,
    termination: Termination,
    history: DescentHistory
}

impl DescentOutcome {
    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn history(&self) -> &DescentHistory {
        &self.history
    }

    pub fn converged(&self) -> bool {
        matches!(self.termination, Termination::Converged { .. })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// FixedStepDescent
// ─────────────────────────────────────────────────────────────────────────────
//
//   x_{i+1} = x_i - η · f'(x_i)
//
// 停止條件（依序檢查）：
//   1. |f'(x_i)| < tolerance
//   2. x_{i+1} 離開定義域 → 不採用該步，回傳 x_i
//   3. 迭代次數用盡 → 回傳最後一次更新的 x

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStepDescent {
    settings: DescentSettings
}

impl FixedStepDescent {
    pub fn new(settings: DescentSettings) -> Result<FixedStepDescent, DescentError> {
        if !(settings.learning_rate > 0.0 && settings.learning_rate.is_finite()) {
            return Err(DescentError::InvalidLearningRate(settings.learning_rate));
        }
        if !(settings.tolerance > 0.0) {
            return Err(DescentError::InvalidTolerance(settings.tolerance));
        }
        if settings.max_iter == 0 {
            return Err(DescentError::NoIterations);
        }
        Ok(FixedStepDescent { settings })
    }

    pub fn settings(&self) -> &DescentSettings {
        &self.settings
    }

    pub fn minimize<O>(&self, objective: &O) -> Result<DescentOutcome, DescentError>
    where
        O: CostFunction<Param = f64, Output = f64> + Gradient<Param = f64, Gradient = f64> + Curve
    {
        let domain = objective.domain();
        let mut x = self.settings.initial_x;
        if !domain.contains(x) {
            return Err(DescentError::StartOutsideDomain(x));
        }

        let mut history = DescentHistory::default();
        for iteration in 0..self.settings.max_iter {
            let gradient = objective
                .gradient(&x)
                .map_err(|error| DescentError::Objective(error.to_string()))?;
            let loss = objective
                .cost(&x)
                .map_err(|error| DescentError::Objective(error.to_string()))?;
            history.record(loss, gradient, x);
            debug!(iteration, x, loss, gradient, "descent step");

            if gradient.abs() < self.settings.tolerance {
                info!(iteration, x, "descent converged");
                return Ok(DescentOutcome {
                    x,
                    termination: Termination::Converged { iteration },
                    history
                });
            }

            let next = x - self.settings.learning_rate * gradient;
            if !domain.contains(next) {
                warn!(iteration, x, rejected_x = next, "iterate left the objective domain, stopping early");
                return Ok(DescentOutcome {
                    x,
                    termination: Termination::LeftDomain { iteration, rejected_x: next },
                    history
                });
            }
            x = next;
        }

        warn!(max_iter = self.settings.max_iter, x, "descent exhausted its iteration budget");
        Ok(DescentOutcome {
            x,
            termination: Termination::IterationLimit,
            history
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::objective::ExpMinusLog;

    #[test]
    fn rejects_invalid_settings() {
        let settings = DescentSettings { learning_rate: 0.0, ..DescentSettings::default() };
        assert_eq!(FixedStepDescent::new(settings), Err(DescentError::InvalidLearningRate(0.0)));

        let settings = DescentSettings { tolerance: -1.0, ..DescentSettings::default() };
        assert_eq!(FixedStepDescent::new(settings), Err(DescentError::InvalidTolerance(-1.0)));

        let settings = DescentSettings { max_iter: 0, ..DescentSettings::default() };
        assert_eq!(FixedStepDescent::new(settings), Err(DescentError::NoIterations));
    }

    #[test]
    fn rejects_start_outside_domain() {
        let settings = DescentSettings { initial_x: -0.5, ..DescentSettings::default() };
        let descent = FixedStepDescent::new(settings).unwrap();
        assert_eq!(descent.minimize(&ExpMinusLog), Err(DescentError::StartOutsideDomain(-0.5)));
    }

    #[test]
    fn history_columns_have_equal_length() {
        let descent = FixedStepDescent::new(DescentSettings::default()).unwrap();
        let outcome = descent.minimize(&ExpMinusLog).unwrap();
        let history = outcome.history();
        assert_eq!(history.losses().len(), history.len());
        assert_eq!(history.gradients().len(), history.len());
        assert_eq!(history.iterates()[0], 0.5);
    }
}
