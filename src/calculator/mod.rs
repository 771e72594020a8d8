//! Calculator inputs
//!
//! The full set of values a user edits, as one immutable struct. Converts
//! to and from the key/value [`InputRecord`] kept by the input store and
//! builds the engine's [`PricingInputs`].

pub mod session;

pub use session::Calculator;

use thiserror::Error;

use crate::config::{DefaultsConfig, SampleConfig};
use crate::persistence::InputRecord;
use crate::pricing::{CostInputs, FeeCapPolicy, FeeSchedule, PaymentMix, PricingInputs};
use crate::types::{MethodValues, PaymentMethod, PaymentMode, PaymentShares};

/// Field names used in stored records and `key=value` overrides
pub mod keys {
    pub const MADA_FEE: &str = "madaFee";
    pub const VISA_FEE: &str = "visaFee";
    pub const STC_FEE: &str = "stcFee";
    pub const TABBY_FEE: &str = "tabbyFee";
    pub const TAMARA_FEE: &str = "tamaraFee";
    pub const FIXED_FEE: &str = "fixedFee";
    pub const VAT_RATE: &str = "vatRate";
    pub const MADA_CAP_ENABLED: &str = "madaCapEnabled";
    pub const MADA_CAP: &str = "madaCap";
    pub const COGS: &str = "cogs";
    pub const SHIPPING: &str = "shipping";
    pub const TARGET_PROFIT: &str = "targetProfit";
    pub const PAYMENT_MODE: &str = "paymentMode";
    pub const SINGLE_METHOD: &str = "singleMethod";
    pub const MADA_SHARE: &str = "madaShare";
    pub const VISA_SHARE: &str = "visaShare";
    pub const STC_SHARE: &str = "stcShare";
    pub const TABBY_SHARE: &str = "tabbyShare";
    pub const TAMARA_SHARE: &str = "tamaraShare";

    pub const ALL: [&str; 19] = [
        MADA_FEE,
        VISA_FEE,
        STC_FEE,
        TABBY_FEE,
        TAMARA_FEE,
        FIXED_FEE,
        VAT_RATE,
        MADA_CAP_ENABLED,
        MADA_CAP,
        COGS,
        SHIPPING,
        TARGET_PROFIT,
        PAYMENT_MODE,
        SINGLE_METHOD,
        MADA_SHARE,
        VISA_SHARE,
        STC_SHARE,
        TABBY_SHARE,
        TAMARA_SHARE,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("unknown payment mode '{0}' (expected single or mix)")]
    UnknownMode(String),
    #[error("unknown payment method '{0}'")]
    UnknownMethod(String),
    #[error("expected key=value, got '{0}'")]
    MalformedOverride(String),
}

/// Read a numeric field the lenient way: invalid text counts as 0
fn parse_number(raw: &str) -> f64 {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

fn fee_key(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Mada => keys::MADA_FEE,
        PaymentMethod::Visa => keys::VISA_FEE,
        PaymentMethod::Stc => keys::STC_FEE,
        PaymentMethod::Tabby => keys::TABBY_FEE,
        PaymentMethod::Tamara => keys::TAMARA_FEE,
    }
}

fn share_key(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Mada => keys::MADA_SHARE,
        PaymentMethod::Visa => keys::VISA_SHARE,
        PaymentMethod::Stc => keys::STC_SHARE,
        PaymentMethod::Tabby => keys::TABBY_SHARE,
        PaymentMethod::Tamara => keys::TAMARA_SHARE,
    }
}

/// Everything the user can set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculatorInputs {
    pub schedule: FeeSchedule,
    pub cap: FeeCapPolicy,
    pub costs: CostInputs,
    pub mode: PaymentMode,
    pub single_method: PaymentMethod,
    /// Kept even in single mode so switching back restores them
    pub shares: PaymentShares,
}

impl Default for CalculatorInputs {
    fn default() -> Self {
        Self::from_config(&DefaultsConfig::default())
    }
}

impl CalculatorInputs {
    pub fn from_config(d: &DefaultsConfig) -> Self {
        Self {
            schedule: FeeSchedule {
                fee_pct: MethodValues::new(
                    d.mada_fee,
                    d.visa_fee,
                    d.stc_fee,
                    d.tabby_fee,
                    d.tamara_fee,
                ),
                fixed_fee: d.fixed_fee,
                vat_pct: d.vat_rate,
            },
            cap: FeeCapPolicy {
                enabled: d.mada_cap_enabled,
                cap: d.mada_cap,
            },
            costs: CostInputs::new(d.cogs, d.shipping, d.target_profit),
            mode: PaymentMode::from_str(&d.payment_mode).unwrap_or_default(),
            single_method: PaymentMethod::from_str(&d.single_method).unwrap_or_default(),
            shares: PaymentShares::new(
                d.mada_share,
                d.visa_share,
                d.stc_share,
                d.tabby_share,
                d.tamara_share,
            ),
        }
    }

    /// Same inputs with the sample product filled in
    pub fn with_sample(&self, sample: &SampleConfig) -> Self {
        Self {
            costs: CostInputs::new(sample.cogs, sample.shipping, sample.target_profit),
            ..*self
        }
    }

    pub fn mix(&self) -> PaymentMix {
        match self.mode {
            PaymentMode::Single => PaymentMix::Single(self.single_method),
            PaymentMode::Mix => PaymentMix::Mix(self.shares),
        }
    }

    pub fn pricing_inputs(&self) -> PricingInputs {
        PricingInputs {
            schedule: self.schedule,
            mix: self.mix(),
            cap: self.cap,
            costs: self.costs,
        }
    }

    /// Build inputs from a stored record.
    ///
    /// Missing or empty fields take the value from `fallback`; fields with
    /// unreadable numbers count as 0; unknown keys are ignored.
    pub fn from_record(record: &InputRecord, fallback: &Self) -> Self {
        let mut inputs = *fallback;
        for (key, value) in record {
            if value.trim().is_empty() {
                continue;
            }
            // Unknown modes/methods keep the fallback
            let _ = inputs.apply(key, value);
        }
        inputs
    }

    /// Set one field by record key
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), InputError> {
        if let Some(method) = PaymentMethod::ALL.iter().find(|m| fee_key(**m) == key) {
            self.schedule.fee_pct.set(*method, parse_number(value));
            return Ok(());
        }
        if let Some(method) = PaymentMethod::ALL.iter().find(|m| share_key(**m) == key) {
            self.shares.set(*method, parse_number(value));
            return Ok(());
        }

        match key {
            keys::FIXED_FEE => self.schedule.fixed_fee = parse_number(value),
            keys::VAT_RATE => self.schedule.vat_pct = parse_number(value),
            keys::MADA_CAP_ENABLED => self.cap.enabled = parse_flag(value),
            keys::MADA_CAP => self.cap.cap = parse_number(value),
            keys::COGS => self.costs.cogs = parse_number(value),
            keys::SHIPPING => self.costs.shipping = parse_number(value),
            keys::TARGET_PROFIT => self.costs.target_profit = parse_number(value),
            keys::PAYMENT_MODE => {
                self.mode = PaymentMode::from_str(value)
                    .ok_or_else(|| InputError::UnknownMode(value.to_string()))?
            }
            keys::SINGLE_METHOD => {
                self.single_method = PaymentMethod::from_str(value)
                    .ok_or_else(|| InputError::UnknownMethod(value.to_string()))?
            }
            other => return Err(InputError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    /// Apply a `key=value` override
    pub fn apply_override(&mut self, arg: &str) -> Result<(), InputError> {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| InputError::MalformedOverride(arg.to_string()))?;
        self.apply(key.trim(), value)
    }

    /// Flatten into a key/value record for the input store
    pub fn to_record(&self) -> InputRecord {
        let mut record = InputRecord::new();
        for (method, pct) in self.schedule.fee_pct.iter() {
            record.insert(fee_key(method).to_string(), pct.to_string());
        }
        for (method, share) in self.shares.iter() {
            record.insert(share_key(method).to_string(), share.to_string());
        }
        record.insert(keys::FIXED_FEE.to_string(), self.schedule.fixed_fee.to_string());
        record.insert(keys::VAT_RATE.to_string(), self.schedule.vat_pct.to_string());
        record.insert(keys::MADA_CAP_ENABLED.to_string(), self.cap.enabled.to_string());
        record.insert(keys::MADA_CAP.to_string(), self.cap.cap.to_string());
        record.insert(keys::COGS.to_string(), self.costs.cogs.to_string());
        record.insert(keys::SHIPPING.to_string(), self.costs.shipping.to_string());
        record.insert(keys::TARGET_PROFIT.to_string(), self.costs.target_profit.to_string());
        record.insert(keys::PAYMENT_MODE.to_string(), self.mode.key().to_string());
        record.insert(
            keys::SINGLE_METHOD.to_string(),
            self.single_method.key().to_string(),
        );
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_fees() {
        let inputs = CalculatorInputs::default();
        assert_eq!(inputs.schedule.fee_pct, MethodValues::new(1.0, 2.2, 1.3, 3.5, 3.5));
        assert_eq!(inputs.schedule.vat_pct, 15.0);
        assert!(!inputs.cap.enabled);
        assert_eq!(inputs.cap.cap, 200.0);
        assert_eq!(inputs.mix(), PaymentMix::Single(PaymentMethod::Mada));
        assert_eq!(inputs.shares.sum(), 100.0);
    }

    #[test]
    fn record_round_trip_covers_every_key() {
        let mut inputs = CalculatorInputs::default();
        inputs.mode = PaymentMode::Mix;
        inputs.cap = FeeCapPolicy::enabled(50.0);
        inputs.costs = CostInputs::new(99.5, 12.0, 30.0);

        let record = inputs.to_record();
        assert_eq!(record.len(), keys::ALL.len());
        for key in keys::ALL {
            assert!(record.contains_key(key), "missing {}", key);
        }
        assert_eq!(
            CalculatorInputs::from_record(&record, &CalculatorInputs::default()),
            inputs
        );
    }

    #[test]
    fn missing_and_empty_fields_fall_back() {
        let mut record = InputRecord::new();
        record.insert(keys::COGS.to_string(), "75".to_string());
        record.insert(keys::VAT_RATE.to_string(), "".to_string());

        let inputs = CalculatorInputs::from_record(&record, &CalculatorInputs::default());
        assert_eq!(inputs.costs.cogs, 75.0);
        assert_eq!(inputs.schedule.vat_pct, 15.0);
        assert_eq!(inputs.schedule.fee_pct.visa, 2.2);
    }

    #[test]
    fn unreadable_numbers_count_as_zero() {
        let mut record = InputRecord::new();
        record.insert(keys::SHIPPING.to_string(), "abc".to_string());
        record.insert(keys::PAYMENT_MODE.to_string(), "weird".to_string());

        let inputs = CalculatorInputs::from_record(&record, &CalculatorInputs::default());
        assert_eq!(inputs.costs.shipping, 0.0);
        assert_eq!(inputs.mode, PaymentMode::Single);
    }

    #[test]
    fn overrides_parse_key_value() {
        let mut inputs = CalculatorInputs::default();
        inputs.apply_override("paymentMode=mix").unwrap();
        inputs.apply_override("tabbyShare=12.5").unwrap();
        assert_eq!(inputs.mode, PaymentMode::Mix);
        assert_eq!(inputs.shares.tabby, 12.5);

        assert_eq!(
            inputs.apply_override("colour=red"),
            Err(InputError::UnknownField("colour".to_string()))
        );
        assert!(matches!(
            inputs.apply_override("cogs"),
            Err(InputError::MalformedOverride(_))
        ));
        assert!(matches!(
            inputs.apply_override("singleMethod=paypal"),
            Err(InputError::UnknownMethod(_))
        ));
    }

    #[test]
    fn sample_only_touches_costs() {
        let sample = SampleConfig::default();
        let inputs = CalculatorInputs::default().with_sample(&sample);
        assert_eq!(inputs.costs, CostInputs::new(100.0, 20.0, 50.0));
        assert_eq!(inputs.schedule, CalculatorInputs::default().schedule);
    }
}
