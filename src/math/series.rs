use serde::Serialize;

pub fn factorial(n: u32) -> f64 {
    (1..=n).fold(1.0, |acc, k| acc * k as f64)
}

/// C(n, k)，以乘積形式計算避免階乘溢位。
pub fn binomial_coefficient(n: u32, k: u32) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaylorTerm {
    order: u32,
    value: f64
}

impl TaylorTerm {
    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn label(&self) -> String {
        format!("1/{}!", self.order)
    }
}

/// Terms 1/k! of the series e = Σ 1/k!, starting at `first_order`.
pub fn exp_taylor_terms(first_order: u32, count: usize) -> Vec<TaylorTerm> {
    (first_order..)
        .take(count)
        .map(|order| TaylorTerm {
            order,
            value: 1.0 / factorial(order)
        })
        .collect()
}

pub fn cumulative_sums(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |total, v| {
            *total += v;
            Some(*total)
        })
        .collect()
}
