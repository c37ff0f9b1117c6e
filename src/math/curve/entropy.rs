use std::f64::consts::{
    E,
    LN_2
};
use std::fmt;

use serde::Serialize;

use crate::math::curve::curve::{
    Curve,
    Domain
};

/// 夾住機率時與 0、1 保持的距離。
pub const PROBABILITY_CLIP: f64 = 1e-10;

// ─────────────────────────────────────────────────────────────────────────────
// LogBase
// ─────────────────────────────────────────────────────────────────────────────

/// 只寫入報告，不從外部讀入；自訂底數一律經過 `LogBase::other` 檢查。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LogBase {
    E,
    Two,
    Ten,
    Other(f64)
}

impl LogBase {
    /// `Other` 只接受 b > 0 且 b ≠ 1。
    pub fn other(base: f64) -> Option<LogBase> {
        if base > 0.0 && base != 1.0 && base.is_finite() {
            Some(LogBase::Other(base))
        } else {
            None
        }
    }

    pub fn base(&self) -> f64 {
        match self {
            LogBase::E => E,
            LogBase::Two => 2.0,
            LogBase::Ten => 10.0,
            LogBase::Other(base) => *base
        }
    }

    /// ln(b)，換底公式的分母。
    pub fn ln(&self) -> f64 {
        match self {
            LogBase::E => 1.0,
            LogBase::Two => LN_2,
            LogBase::Ten => std::f64::consts::LN_10,
            LogBase::Other(base) => base.ln()
        }
    }

    pub fn log(&self, x: f64) -> f64 {
        match self {
            LogBase::E => x.ln(),
            LogBase::Two => x.log2(),
            LogBase::Ten => x.log10(),
            LogBase::Other(base) => x.ln() / base.ln()
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            LogBase::E => "nats",
            LogBase::Two => "bits",
            LogBase::Ten => "hartleys",
            LogBase::Other(_) => "units"
        }
    }
}

impl fmt::Display for LogBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogBase::E => write!(f, "e"),
            LogBase::Two => write!(f, "2"),
            LogBase::Ten => write!(f, "10"),
            LogBase::Other(base) => write!(f, "{}", base)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// BernoulliEntropy
// ─────────────────────────────────────────────────────────────────────────────
//
//   H(p) = -p·log_b(p) - (1-p)·log_b(1-p)
//
// 對任何底數，最大值都出現在 p = 0.5，其值為 log_b(2)。

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BernoulliEntropy {
    base: LogBase
}

impl BernoulliEntropy {
    pub fn new(base: LogBase) -> BernoulliEntropy {
        BernoulliEntropy { base }
    }

    pub fn base(&self) -> LogBase {
        self.base
    }

    pub fn argmax(&self) -> f64 {
        0.5
    }

    pub fn max_value(&self) -> f64 {
        LN_2 / self.base.ln()
    }
}

impl Curve for BernoulliEntropy {
    fn value(&self, p: f64) -> f64 {
        let p = self.domain().clip(p, PROBABILITY_CLIP);
        let q = 1.0 - p;
        -p * self.base.log(p) - q * self.base.log(q)
    }

    /// H'(p) = log_b((1-p)/p)
    fn derivative(&self, p: f64) -> f64 {
        let p = self.domain().clip(p, PROBABILITY_CLIP);
        self.base.log((1.0 - p) / p)
    }

    fn domain(&self) -> Domain {
        Domain::UNIT_INTERVAL
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// NegativeXLogX
// ─────────────────────────────────────────────────────────────────────────────
//
//   f(x) = -x·log_b(x) = -x·ln(x) / ln(b)
//
// ln(b) 只是常數倍率，故極大值點恆為 x = 1/e，極大值為 1/(e·ln(b))。

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegativeXLogX {
    base: LogBase
}

impl NegativeXLogX {
    pub fn new(base: LogBase) -> NegativeXLogX {
        NegativeXLogX { base }
    }

    pub fn base(&self) -> LogBase {
        self.base
    }

    pub fn argmax(&self) -> f64 {
        1.0 / E
    }

    pub fn max_value(&self) -> f64 {
        1.0 / (E * self.base.ln())
    }
}

impl Curve for NegativeXLogX {
    fn value(&self, x: f64) -> f64 {
        -x * x.ln() / self.base.ln()
    }

    fn derivative(&self, x: f64) -> f64 {
        -(x.ln() + 1.0) / self.base.ln()
    }

    fn domain(&self) -> Domain {
        Domain::POSITIVE
    }
}
