use crate::math::grid::{
    Grid,
    Samples
};

// ─────────────────────────────────────────────────────────────────────────────
// Domain
// ─────────────────────────────────────────────────────────────────────────────

/// 開區間 (lower, upper)，兩端可為無窮。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    lower: f64,
    upper: f64
}

impl Domain {
    pub const REAL_LINE: Domain = Domain {
        lower: f64::NEG_INFINITY,
        upper: f64::INFINITY
    };

    pub const POSITIVE: Domain = Domain {
        lower: 0.0,
        upper: f64::INFINITY
    };

    pub const UNIT_INTERVAL: Domain = Domain {
        lower: 0.0,
        upper: 1.0
    };

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn contains(&self, x: f64) -> bool {
        x > self.lower && x < self.upper
    }

    /// 將 x 夾到 [lower + margin, upper - margin]，避免 log(0)。
    pub fn clip(&self, x: f64, margin: f64) -> f64 {
        x.clamp(self.lower + margin, self.upper - margin)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Curve
// ─────────────────────────────────────────────────────────────────────────────

pub trait Curve {
    fn value(&self, x: f64) -> f64;

    fn derivative(&self, x: f64) -> f64;

    fn domain(&self) -> Domain {
        Domain::REAL_LINE
    }

    fn sample(&self, grid: &Grid) -> Samples {
        grid.evaluate(|x| self.value(x))
    }

    fn sample_derivative(&self, grid: &Grid) -> Samples {
        grid.evaluate(|x| self.derivative(x))
    }
}

pub trait CurveIntegration {
    /// ∫_a^b f(x) dx
    fn integral(&self, a: f64, b: f64) -> f64;
}
