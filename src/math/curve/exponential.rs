use std::f64::consts::E;

use crate::math::curve::curve::{
    Curve,
    CurveIntegration,
    Domain
};

/// y = e^x
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Exponential;

impl Curve for Exponential {
    fn value(&self, x: f64) -> f64 {
        x.exp()
    }

    fn derivative(&self, x: f64) -> f64 {
        x.exp()
    }
}

impl CurveIntegration for Exponential {
    fn integral(&self, a: f64, b: f64) -> f64 {
        b.exp() - a.exp()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// CompoundLimit
// ─────────────────────────────────────────────────────────────────────────────
//
//   g(x) = (1 + 1/x)^x  →  e  (x → ∞)
//
// 年利率 100%、一年內複利 x 次的本利和。

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CompoundLimit;

impl CompoundLimit {
    pub fn limit(&self) -> f64 {
        E
    }
}

impl Curve for CompoundLimit {
    fn value(&self, x: f64) -> f64 {
        (1.0 + 1.0 / x).powf(x)
    }

    /// g'(x) = g(x)·(ln(1 + 1/x) - 1/(1 + x))
    fn derivative(&self, x: f64) -> f64 {
        self.value(x) * ((1.0 / x).ln_1p() - 1.0 / (1.0 + x))
    }

    fn domain(&self) -> Domain {
        Domain::POSITIVE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponential_integral_over_unit_interval() {
        assert!((Exponential.integral(0.0, 1.0) - (E - 1.0)).abs() < 1e-15);
    }

    #[test]
    fn compound_limit_grows_toward_e() {
        let g = CompoundLimit;
        assert!(g.derivative(1.0) > 0.0);
        assert!(g.derivative(1000.0) > 0.0);
        assert!(E - g.value(1e6) < 1e-5);
    }
}
