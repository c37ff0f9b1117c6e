use serde::Serialize;

use crate::math::curve::curve::Curve;

/// |σ'(x)| 低於此值即視為飽和（梯度消失）。
pub const SATURATION_THRESHOLD: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Activity {
    Active,
    Saturated
}

// ─────────────────────────────────────────────────────────────────────────────
// Sigmoid
// ─────────────────────────────────────────────────────────────────────────────

/// σ(x) = 1 / (1 + e^-x)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sigmoid;

impl Sigmoid {
    pub fn new() -> Sigmoid {
        Sigmoid
    }

    pub fn activity(&self, x: f64, threshold: f64) -> Activity {
        if self.derivative(x).abs() > threshold {
            Activity::Active
        } else {
            Activity::Saturated
        }
    }

    /// σ' 的最大值出現在 x = 0，值為 1/4。
    pub fn max_derivative(&self) -> f64 {
        0.25
    }
}

impl Curve for Sigmoid {
    fn value(&self, x: f64) -> f64 {
        // 分段計算，避免 e^-x 在 x 很負時溢位
        if x >= 0.0 {
            1.0 / (1.0 + (-x).exp())
        } else {
            let z = x.exp();
            z / (1.0 + z)
        }
    }

    fn derivative(&self, x: f64) -> f64 {
        let s = self.value(x);
        s * (1.0 - s)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ReversedSigmoid
// ─────────────────────────────────────────────────────────────────────────────

/// 1 / (1 + e^x) = 1 - σ(x) = σ(-x)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReversedSigmoid;

impl ReversedSigmoid {
    pub fn new() -> ReversedSigmoid {
        ReversedSigmoid
    }
}

impl Curve for ReversedSigmoid {
    fn value(&self, x: f64) -> f64 {
        Sigmoid.value(-x)
    }

    fn derivative(&self, x: f64) -> f64 {
        -Sigmoid.derivative(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extreme_inputs_do_not_overflow() {
        assert_eq!(Sigmoid.value(-1000.0), 0.0);
        assert_eq!(Sigmoid.value(1000.0), 1.0);
        assert!(Sigmoid.derivative(-1000.0).is_finite());
    }

    #[test]
    fn activity_follows_threshold() {
        assert_eq!(Sigmoid.activity(3.0, SATURATION_THRESHOLD), Activity::Active);
        assert_eq!(Sigmoid.activity(-5.0, SATURATION_THRESHOLD), Activity::Saturated);
    }

    #[test]
    fn reversed_sigmoid_decreases() {
        let reversed = ReversedSigmoid::new();
        assert_eq!(reversed.value(0.0), 0.5);
        assert!(reversed.value(1.0) < reversed.value(-1.0));
        assert!(reversed.derivative(0.0) < 0.0);
    }
}
