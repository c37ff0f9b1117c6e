use argmin::core::{
    CostFunction,
    Error,
    Gradient
};

use crate::math::curve::curve::{
    Curve,
    Domain
};

/// f(x) = e^x - ln(x)，定義域 x > 0。
///
/// 極小值點滿足 e^x = 1/x，即 x = W(1) ≈ 0.567143（omega 常數）。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExpMinusLog;

impl ExpMinusLog {
    pub const MINIMIZER: f64 = 0.567_143_290_409_783_8;
}

impl Curve for ExpMinusLog {
    fn value(&self, x: f64) -> f64 {
        x.exp() - x.ln()
    }

    fn derivative(&self, x: f64) -> f64 {
        x.exp() - 1.0 / x
    }

    fn domain(&self) -> Domain {
        Domain::POSITIVE
    }
}

impl CostFunction for ExpMinusLog {
    type Param = f64;
    type Output = f64;

    fn cost(&self, x: &Self::Param) -> Result<Self::Output, Error> {
        Ok(self.value(*x))
    }
}

impl Gradient for ExpMinusLog {
    type Param = f64;
    type Gradient = f64;

    fn gradient(&self, x: &Self::Param) -> Result<Self::Gradient, Error> {
        Ok(self.derivative(*x))
    }
}
