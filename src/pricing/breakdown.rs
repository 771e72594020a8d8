//! Fee breakdown for a solved price, including the mada fee cap.
//!
//! The cap is applied after the price was solved with the uncapped rate and
//! does not feed back into the price. Clipping only changes the reported
//! gateway fees, fee tax and profit.

use serde::Serialize;

use crate::pricing::model::{CostInputs, FeeCapPolicy, FeeSchedule, PaymentMix};
use crate::pricing::money::{format_amount, round2};
use crate::types::PaymentMethod;

/// How a pricing run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceOutcome {
    Priced,
    /// Negative cost, shipping, profit or fixed fee
    InvalidInput,
    /// No finite price covers the fees
    Unbounded,
}

/// Price and fee figures for one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBreakdown {
    pub outcome: PriceOutcome,
    /// Recommended selling price; infinite when unbounded
    pub recommended_price: f64,
    /// Gateway fees + fee tax + fixed fee
    pub total_fees: f64,
    /// VAT on gateway fees and the fixed fee
    pub fee_tax: f64,
    pub net_profit: f64,
    /// Net profit as percent of price
    pub margin_pct: f64,
    /// Blended gateway rate as a fraction
    pub weighted_fee_rate: f64,
    /// Gateway fees after the cap
    pub gateway_fees: f64,
    pub fixed_fee: f64,
    pub shipping: f64,
}

impl PriceBreakdown {
    /// Breakdown reported for invalid input: everything zero
    pub fn zero() -> Self {
        Self {
            outcome: PriceOutcome::InvalidInput,
            recommended_price: 0.0,
            total_fees: 0.0,
            fee_tax: 0.0,
            net_profit: 0.0,
            margin_pct: 0.0,
            weighted_fee_rate: 0.0,
            gateway_fees: 0.0,
            fixed_fee: 0.0,
            shipping: 0.0,
        }
    }

    /// Breakdown reported when no finite price exists
    pub fn unbounded(weighted_fee_rate: f64) -> Self {
        Self {
            outcome: PriceOutcome::Unbounded,
            recommended_price: f64::INFINITY,
            weighted_fee_rate,
            ..Self::zero()
        }
    }

    pub fn is_priced(&self) -> bool {
        self.outcome == PriceOutcome::Priced
    }

    /// Copy with every figure rounded to 2 decimals for display.
    /// The weighted rate is kept as a fraction with full precision.
    pub fn rounded(&self) -> Self {
        Self {
            outcome: self.outcome,
            recommended_price: round2(self.recommended_price),
            total_fees: round2(self.total_fees),
            fee_tax: round2(self.fee_tax),
            net_profit: round2(self.net_profit),
            margin_pct: round2(self.margin_pct),
            weighted_fee_rate: self.weighted_fee_rate,
            gateway_fees: round2(self.gateway_fees),
            fixed_fee: round2(self.fixed_fee),
            shipping: round2(self.shipping),
        }
    }

    /// Weighted rate as a display percent (1.89 for 0.0189)
    pub fn weighted_fee_pct(&self) -> f64 {
        round2(self.weighted_fee_rate * 100.0)
    }

    pub fn price_label(&self) -> String {
        format_amount(self.recommended_price)
    }
}

impl std::fmt::Display for PriceBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Recommended price : {}", self.price_label())?;
        writeln!(f, "Total fees        : {}", format_amount(self.total_fees))?;
        writeln!(f, "Net profit        : {}", format_amount(self.net_profit))?;
        writeln!(f, "Margin            : {}%", format_amount(self.margin_pct))?;
        writeln!(f, "---")?;
        writeln!(f, "Weighted fee      : {:.2}%", self.weighted_fee_pct())?;
        writeln!(f, "Gateway fees      : {}", format_amount(self.gateway_fees))?;
        writeln!(f, "Fixed fee         : {}", format_amount(self.fixed_fee))?;
        writeln!(f, "Fee tax           : {}", format_amount(self.fee_tax))?;
        writeln!(f, "Shipping          : {}", format_amount(self.shipping))?;
        write!(f, "Total deducted    : {}", format_amount(self.total_fees))
    }
}

/// Gateway fees for `price` after the mada cap, if one is active
fn capped_gateway_fees(
    price: f64,
    weighted_rate: f64,
    schedule: &FeeSchedule,
    cap: &FeeCapPolicy,
    mix: &PaymentMix,
) -> f64 {
    let raw = price * weighted_rate;
    let Some(cap) = cap.active_cap() else {
        return raw;
    };

    match mix {
        PaymentMix::Single(PaymentMethod::Mada) => raw.min(cap),
        PaymentMix::Single(_) => raw,
        PaymentMix::Mix(_) => {
            let mada_portion =
                price * schedule.rate(PaymentMethod::Mada) * mix.share(PaymentMethod::Mada);
            let clipped = mada_portion - mada_portion.min(cap);
            raw - clipped
        }
    }
}

/// Fee, tax, profit and margin figures for an already solved price.
pub fn compute_breakdown(
    price: f64,
    weighted_rate: f64,
    costs: &CostInputs,
    schedule: &FeeSchedule,
    cap: &FeeCapPolicy,
    mix: &PaymentMix,
) -> PriceBreakdown {
    if !price.is_finite() {
        return PriceBreakdown::unbounded(weighted_rate);
    }

    let vat = schedule.vat_rate();
    let fixed_fee = schedule.fixed_fee;

    let gateway_fees = capped_gateway_fees(price, weighted_rate, schedule, cap, mix);
    let fee_tax = gateway_fees * vat + fixed_fee * vat;
    let total_fees = gateway_fees + fee_tax + fixed_fee;

    let net_profit = price - costs.cogs - costs.shipping - total_fees;
    let margin_pct = if price > 0.0 {
        net_profit / price * 100.0
    } else {
        0.0
    };

    PriceBreakdown {
        outcome: PriceOutcome::Priced,
        recommended_price: price,
        total_fees,
        fee_tax,
        net_profit,
        margin_pct,
        weighted_fee_rate: weighted_rate,
        gateway_fees,
        fixed_fee,
        shipping: costs.shipping,
    }
}
