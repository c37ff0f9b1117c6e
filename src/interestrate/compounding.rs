use serde::{
    Deserialize,
    Serialize
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Compounding {
    Simple,
    Continuous,
    Annual,
    Semiannual,
    Quarterly,
    Bimonthly,
    Monthly,
    Biweekly,
    Weekly,
    Daily,
    Hourly,
    EveryMinute
}

impl Compounding {
    /// 單利與連續複利沒有離散的結算頻率。
    pub fn frequency(&self) -> Option<f64> {
        match self {
            Compounding::Annual => Some(1.0),
            Compounding::Semiannual => Some(2.0),
            Compounding::Quarterly => Some(4.0),
            Compounding::Bimonthly => Some(6.0),
            Compounding::Monthly => Some(12.0),
            Compounding::Biweekly => Some(26.0),
            Compounding::Weekly => Some(52.0),
            Compounding::Daily => Some(365.0),
            Compounding::Hourly => Some(365.0 * 24.0),
            Compounding::EveryMinute => Some(365.0 * 24.0 * 60.0),
            Compounding::Simple | Compounding::Continuous => None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Compounding::Simple => "Simple",
            Compounding::Continuous => "Continuous",
            Compounding::Annual => "Annual",
            Compounding::Semiannual => "Semiannual",
            Compounding::Quarterly => "Quarterly",
            Compounding::Bimonthly => "Bimonthly",
            Compounding::Monthly => "Monthly",
            Compounding::Biweekly => "Biweekly",
            Compounding::Weekly => "Weekly",
            Compounding::Daily => "Daily",
            Compounding::Hourly => "Hourly",
            Compounding::EveryMinute => "Every minute"
        }
    }

    pub fn future_value(&self, rate: f64, tau: f64) -> f64 {
        match self.frequency() {
            Some(freq) => (1.0 + rate / freq).powf(tau * freq),
            None => match self {
                Compounding::Continuous => (rate * tau).exp(),
                _ => 1.0 + rate * tau
            }
        }
    }

    pub fn implied_rate(&self, future_value: f64, tau: f64) -> f64 {
        match self.frequency() {
            Some(freq) => (future_value.powf(1.0 / (tau * freq)) - 1.0) * freq,
            None => match self {
                Compounding::Continuous => future_value.ln() / tau,
                _ => (future_value - 1.0) / tau
            }
        }
    }
}
