//! Pricing engine.
//!
//! Pure functions from a [`PricingInputs`] set to a [`PriceBreakdown`]:
//! weighted gateway rate, closed-form price, then fees with the mada cap.

pub mod breakdown;
pub mod fee_rate;
pub mod model;
pub mod money;
pub mod shares;
pub mod solver;

pub use breakdown::{compute_breakdown, PriceBreakdown, PriceOutcome};
pub use fee_rate::weighted_fee_rate;
pub use model::{CostInputs, FeeCapPolicy, FeeSchedule, PaymentMix, PricingInputs, TargetProfit};
pub use money::{format_amount, round2};
pub use shares::{check_shares, normalize_shares, ShareCheck, ShareError};
pub use solver::{solve_price, PriceSolution};

use tracing::debug;

/// Run the whole engine for one input set
pub fn price(inputs: &PricingInputs) -> PriceBreakdown {
    let rate = weighted_fee_rate(&inputs.schedule, &inputs.mix);
    let solution = solve_price(
        &inputs.costs,
        inputs.schedule.fixed_fee,
        inputs.schedule.vat_rate(),
        rate,
    );

    match solution {
        PriceSolution::Invalid => {
            debug!(costs = ?inputs.costs, "negative input, reporting zero breakdown");
            PriceBreakdown::zero()
        }
        PriceSolution::Unbounded => {
            debug!(
                weighted_rate = rate,
                vat_rate = inputs.schedule.vat_rate(),
                "fees consume the whole price, no finite solution"
            );
            PriceBreakdown::unbounded(rate)
        }
        PriceSolution::Finite(s) => compute_breakdown(
            s,
            rate,
            &inputs.costs,
            &inputs.schedule,
            &inputs.cap,
            &inputs.mix,
        ),
    }
}
