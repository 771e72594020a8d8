//! Engine input types: fee schedule, payment mix, fee cap and cost inputs.

use serde::{Deserialize, Serialize};

use crate::types::{non_negative, MethodValues, PaymentMethod, PaymentMode, PaymentShares};

/// Gateway fee percentages, fixed per-transaction fee and VAT
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Fee per method as percent of the selling price (1.0 = 1%)
    pub fee_pct: MethodValues,
    /// Fixed fee charged per transaction (currency)
    pub fixed_fee: f64,
    /// VAT in percent, charged on gateway fees and the fixed fee only
    pub vat_pct: f64,
}

impl FeeSchedule {
    /// Fee rate of one method as a fraction of price
    pub fn rate(&self, method: PaymentMethod) -> f64 {
        non_negative(self.fee_pct.get(method)) / 100.0
    }

    /// VAT as a fraction
    pub fn vat_rate(&self) -> f64 {
        non_negative(self.vat_pct) / 100.0
    }
}

/// How transaction volume is spread over payment methods
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaymentMix {
    /// Every sale goes through one method
    Single(PaymentMethod),
    /// Volume shares in percent. Expected to sum to 100; not enforced here,
    /// see [`crate::pricing::normalize_shares`].
    Mix(PaymentShares),
}

impl PaymentMix {
    pub fn mode(&self) -> PaymentMode {
        match self {
            PaymentMix::Single(_) => PaymentMode::Single,
            PaymentMix::Mix(_) => PaymentMode::Mix,
        }
    }

    /// Share of `method` as a fraction of 1
    pub fn share(&self, method: PaymentMethod) -> f64 {
        match self {
            PaymentMix::Single(selected) => {
                if *selected == method {
                    1.0
                } else {
                    0.0
                }
            }
            PaymentMix::Mix(shares) => non_negative(shares.get(method)) / 100.0,
        }
    }
}

impl Default for PaymentMix {
    fn default() -> Self {
        PaymentMix::Single(PaymentMethod::Mada)
    }
}

/// Ceiling on the mada part of gateway fees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeeCapPolicy {
    pub enabled: bool,
    /// Cap amount (currency)
    pub cap: f64,
}

impl FeeCapPolicy {
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn enabled(cap: f64) -> Self {
        Self { enabled: true, cap }
    }

    /// Cap amount when the policy is switched on
    pub fn active_cap(&self) -> Option<f64> {
        if self.enabled {
            Some(non_negative(self.cap))
        } else {
            None
        }
    }
}

/// Product cost side of the pricing equation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostInputs {
    /// Cost of goods sold
    pub cogs: f64,
    pub shipping: f64,
    /// Net profit wanted per sale
    pub target_profit: f64,
}

impl CostInputs {
    pub fn new(cogs: f64, shipping: f64, target_profit: f64) -> Self {
        Self {
            cogs,
            shipping,
            target_profit,
        }
    }

    /// Build cost inputs resolving a [`TargetProfit`] against cogs + shipping
    pub fn with_target(cogs: f64, shipping: f64, target: TargetProfit) -> Self {
        Self::new(cogs, shipping, target.resolve(cogs, shipping))
    }
}

/// Ways a caller can express the wanted profit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetProfit {
    /// Flat amount in currency
    Amount(f64),
    /// Percent of cogs + shipping
    PercentOfCost(f64),
}

impl TargetProfit {
    pub fn resolve(&self, cogs: f64, shipping: f64) -> f64 {
        match self {
            TargetProfit::Amount(amount) => *amount,
            TargetProfit::PercentOfCost(pct) => (cogs + shipping) * pct / 100.0,
        }
    }
}

/// Everything one pricing run needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingInputs {
    pub schedule: FeeSchedule,
    pub mix: PaymentMix,
    pub cap: FeeCapPolicy,
    pub costs: CostInputs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_rates_are_clamped() {
        let schedule = FeeSchedule {
            fee_pct: MethodValues::new(-1.0, 2.2, 1.3, 3.5, 3.5),
            fixed_fee: 1.0,
            vat_pct: -15.0,
        };
        assert_eq!(schedule.rate(PaymentMethod::Mada), 0.0);
        assert!((schedule.rate(PaymentMethod::Visa) - 0.022).abs() < 1e-12);
        assert_eq!(schedule.vat_rate(), 0.0);
    }

    #[test]
    fn single_mix_puts_whole_share_on_selected_method() {
        let mix = PaymentMix::Single(PaymentMethod::Tabby);
        assert_eq!(mix.share(PaymentMethod::Tabby), 1.0);
        assert_eq!(mix.share(PaymentMethod::Mada), 0.0);
    }

    #[test]
    fn disabled_cap_is_inactive() {
        assert_eq!(FeeCapPolicy::disabled().active_cap(), None);
        assert_eq!(FeeCapPolicy::enabled(-5.0).active_cap(), Some(0.0));
    }

    #[test]
    fn percent_target_profit_uses_cost_plus_shipping() {
        let costs = CostInputs::with_target(100.0, 20.0, TargetProfit::PercentOfCost(25.0));
        assert!((costs.target_profit - 30.0).abs() < 1e-12);
        let flat = CostInputs::with_target(100.0, 20.0, TargetProfit::Amount(50.0));
        assert_eq!(flat.target_profit, 50.0);
    }
}
