//! Core types used throughout PriceCalc
//!
//! Defines the payment methods, payment modes and per-method value sets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported payment methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Mada,
    Visa,
    Stc,
    Tabby,
    Tamara,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Mada
    }
}

impl PaymentMethod {
    /// All methods in display order
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Mada,
        PaymentMethod::Visa,
        PaymentMethod::Stc,
        PaymentMethod::Tabby,
        PaymentMethod::Tamara,
    ];

    /// Lowercase key used in stored records and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            PaymentMethod::Mada => "mada",
            PaymentMethod::Visa => "visa",
            PaymentMethod::Stc => "stc",
            PaymentMethod::Tabby => "tabby",
            PaymentMethod::Tamara => "tamara",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mada" => Some(PaymentMethod::Mada),
            "visa" => Some(PaymentMethod::Visa),
            "stc" | "stcpay" | "stc_pay" => Some(PaymentMethod::Stc),
            "tabby" => Some(PaymentMethod::Tabby),
            "tamara" => Some(PaymentMethod::Tamara),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Mada => write!(f, "mada"),
            PaymentMethod::Visa => write!(f, "Visa/Mastercard"),
            PaymentMethod::Stc => write!(f, "STC Pay"),
            PaymentMethod::Tabby => write!(f, "Tabby"),
            PaymentMethod::Tamara => write!(f, "Tamara"),
        }
    }
}

/// Whether a price is computed for one method or a weighted mix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    Single,
    Mix,
}

impl Default for PaymentMode {
    fn default() -> Self {
        PaymentMode::Single
    }
}

impl PaymentMode {
    pub fn key(&self) -> &'static str {
        match self {
            PaymentMode::Single => "single",
            PaymentMode::Mix => "mix",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "single" => Some(PaymentMode::Single),
            "mix" | "mixed" => Some(PaymentMode::Mix),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One number per payment method.
///
/// Used for both fee percentages and volume shares.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MethodValues {
    pub mada: f64,
    pub visa: f64,
    pub stc: f64,
    pub tabby: f64,
    pub tamara: f64,
}

impl MethodValues {
    pub fn new(mada: f64, visa: f64, stc: f64, tabby: f64, tamara: f64) -> Self {
        Self {
            mada,
            visa,
            stc,
            tabby,
            tamara,
        }
    }

    pub fn get(&self, method: PaymentMethod) -> f64 {
        match method {
            PaymentMethod::Mada => self.mada,
            PaymentMethod::Visa => self.visa,
            PaymentMethod::Stc => self.stc,
            PaymentMethod::Tabby => self.tabby,
            PaymentMethod::Tamara => self.tamara,
        }
    }

    pub fn set(&mut self, method: PaymentMethod, value: f64) {
        match method {
            PaymentMethod::Mada => self.mada = value,
            PaymentMethod::Visa => self.visa = value,
            PaymentMethod::Stc => self.stc = value,
            PaymentMethod::Tabby => self.tabby = value,
            PaymentMethod::Tamara => self.tamara = value,
        }
    }

    /// Apply `f` to every value
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(
            f(self.mada),
            f(self.visa),
            f(self.stc),
            f(self.tabby),
            f(self.tamara),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (PaymentMethod, f64)> + '_ {
        PaymentMethod::ALL.iter().map(move |m| (*m, self.get(*m)))
    }

    pub fn sum(&self) -> f64 {
        self.mada + self.visa + self.stc + self.tabby + self.tamara
    }
}

/// Volume shares per payment method, in percent
pub type PaymentShares = MethodValues;

/// Clamp a rate-like input to a usable non-negative number.
///
/// NaN and negative values read as 0.
pub fn non_negative(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_round_trips_through_key() {
        for method in PaymentMethod::ALL {
            assert_eq!(PaymentMethod::from_str(method.key()), Some(method));
        }
        assert_eq!(PaymentMethod::from_str("paypal"), None);
    }

    #[test]
    fn method_values_sum_and_lookup() {
        let mut v = MethodValues::new(40.0, 30.0, 10.0, 10.0, 10.0);
        assert_eq!(v.sum(), 100.0);
        v.set(PaymentMethod::Tamara, 0.0);
        assert_eq!(v.get(PaymentMethod::Tamara), 0.0);
        assert_eq!(v.iter().count(), 5);
    }

    #[test]
    fn non_negative_clamps_nan_and_negatives() {
        assert_eq!(non_negative(-3.0), 0.0);
        assert_eq!(non_negative(f64::NAN), 0.0);
        assert_eq!(non_negative(2.5), 2.5);
    }
}
