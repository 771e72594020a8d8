//! Closed-form selling price.
//!
//! Gateway fees are a percentage of the unknown price, so
//!
//! ```text
//! S = C + SH + F(1+V) + TP + S·P(1+V)
//! S = (C + SH + F(1+V) + TP) / (1 - P(1+V))
//! ```

use crate::pricing::model::CostInputs;
use crate::types::non_negative;

/// Result of solving for the selling price
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceSolution {
    Finite(f64),
    /// Fees plus VAT take 100% or more of any price
    Unbounded,
    /// A cost, profit or fixed fee was negative
    Invalid,
}

impl PriceSolution {
    /// Solved price; infinite when unbounded, zero when invalid
    pub fn price(&self) -> f64 {
        match self {
            PriceSolution::Finite(price) => *price,
            PriceSolution::Unbounded => f64::INFINITY,
            PriceSolution::Invalid => 0.0,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, PriceSolution::Unbounded)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, PriceSolution::Invalid)
    }
}

/// Solve for the recommended price.
///
/// `vat_rate` and `weighted_rate` are fractions (0.15, 0.0189).
pub fn solve_price(
    costs: &CostInputs,
    fixed_fee: f64,
    vat_rate: f64,
    weighted_rate: f64,
) -> PriceSolution {
    // NaN fails the comparison as well
    let valid = [costs.cogs, costs.shipping, costs.target_profit, fixed_fee]
        .iter()
        .all(|v| *v >= 0.0);
    if !valid {
        return PriceSolution::Invalid;
    }

    let vat_factor = 1.0 + non_negative(vat_rate);
    let denominator = 1.0 - non_negative(weighted_rate) * vat_factor;
    if denominator <= 0.0 {
        return PriceSolution::Unbounded;
    }

    let numerator = costs.cogs + costs.shipping + fixed_fee * vat_factor + costs.target_profit;
    PriceSolution::Finite(numerator / denominator)
}
