use crate::math::curve::curve::{
    Curve,
    Domain
};
use crate::math::series::binomial_coefficient;

// ─────────────────────────────────────────────────────────────────────────────
// BernoulliTerm
// ─────────────────────────────────────────────────────────────────────────────
//
//   f(p) = p^k · (1-p)^m
//
// 即二項分布 B(k+m, p) 中某一特定結果序列的機率（不含組合數）。

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BernoulliTerm {
    successes: u32,
    failures: u32
}

impl BernoulliTerm {
    pub fn new(successes: u32, failures: u32) -> BernoulliTerm {
        BernoulliTerm { successes, failures }
    }

    pub fn successes(&self) -> u32 {
        self.successes
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// 解析解：argmax f = k / (k + m)
    pub fn mode(&self) -> f64 {
        self.successes as f64 / (self.successes + self.failures) as f64
    }

    pub fn log_value(&self, p: f64) -> f64 {
        self.successes as f64 * p.ln() + self.failures as f64 * (1.0 - p).ln()
    }

    /// d/dp log f = k/p - m/(1-p)
    pub fn log_derivative(&self, p: f64) -> f64 {
        self.successes as f64 / p - self.failures as f64 / (1.0 - p)
    }

    pub fn log_likelihood(&self) -> LogLikelihood {
        LogLikelihood {
            term: *self,
            offset: 0.0
        }
    }
}

impl Curve for BernoulliTerm {
    fn value(&self, p: f64) -> f64 {
        p.powi(self.successes as i32) * (1.0 - p).powi(self.failures as i32)
    }

    fn derivative(&self, p: f64) -> f64 {
        let k = self.successes as i32;
        let m = self.failures as i32;
        let left = if k == 0 {
            0.0
        } else {
            k as f64 * p.powi(k - 1) * (1.0 - p).powi(m)
        };
        let right = if m == 0 {
            0.0
        } else {
            m as f64 * p.powi(k) * (1.0 - p).powi(m - 1)
        };
        left - right
    }

    fn domain(&self) -> Domain {
        Domain::UNIT_INTERVAL
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// BinomialProbability
// ─────────────────────────────────────────────────────────────────────────────

/// P(X = k | n, p) = C(n, k) · p^k · (1-p)^(n-k)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialProbability {
    term: BernoulliTerm,
    coefficient: f64
}

impl BinomialProbability {
    /// `successes` 不得超過 `trials`。
    pub fn new(trials: u32, successes: u32) -> Option<BinomialProbability> {
        if successes > trials {
            return None;
        }
        Some(BinomialProbability {
            term: BernoulliTerm::new(successes, trials - successes),
            coefficient: binomial_coefficient(trials, successes)
        })
    }

    /// 由單一序列機率補上組合數 C(k+m, k)。
    pub fn from_term(term: BernoulliTerm) -> BinomialProbability {
        BinomialProbability {
            term,
            coefficient: binomial_coefficient(term.successes + term.failures, term.successes)
        }
    }

    pub fn term(&self) -> &BernoulliTerm {
        &self.term
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    pub fn mode(&self) -> f64 {
        self.term.mode()
    }

    pub fn log_likelihood(&self) -> LogLikelihood {
        LogLikelihood {
            term: self.term,
            offset: self.coefficient.ln()
        }
    }
}

impl Curve for BinomialProbability {
    fn value(&self, p: f64) -> f64 {
        self.coefficient * self.term.value(p)
    }

    fn derivative(&self, p: f64) -> f64 {
        self.coefficient * self.term.derivative(p)
    }

    fn domain(&self) -> Domain {
        Domain::UNIT_INTERVAL
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// LogLikelihood
// ─────────────────────────────────────────────────────────────────────────────

/// log L(p) = offset + k·ln(p) + m·ln(1-p)；offset 為 ln C(n, k) 或 0。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogLikelihood {
    term: BernoulliTerm,
    offset: f64
}

impl LogLikelihood {
    pub fn offset(&self) -> f64 {
        self.offset
    }
}

impl Curve for LogLikelihood {
    fn value(&self, p: f64) -> f64 {
        self.offset + self.term.log_value(p)
    }

    fn derivative(&self, p: f64) -> f64 {
        self.term.log_derivative(p)
    }

    fn domain(&self) -> Domain {
        Domain::UNIT_INTERVAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivative_vanishes_at_mode() {
        let term = BernoulliTerm::new(7, 3);
        assert!(term.derivative(0.7).abs() < 1e-12);
        assert!(term.log_derivative(0.7).abs() < 1e-12);
        assert!(term.derivative(0.5) > 0.0);
        assert!(term.derivative(0.9) < 0.0);
    }

    #[test]
    fn binomial_rejects_more_successes_than_trials() {
        assert!(BinomialProbability::new(3, 4).is_none());
        let binomial = BinomialProbability::new(10, 7).unwrap();
        assert_eq!(binomial.coefficient(), 120.0);
        assert_eq!(binomial.term().failures(), 3);
    }
}
