use crate::pricing::model::{FeeSchedule, PaymentMix};
use crate::types::PaymentMethod;

/// Blended gateway fee rate (fraction of price) for a payment mix.
///
/// Single mode returns the selected method's rate. Mix mode returns
/// `sum(rate_i * share_i)`; shares that do not add up to 100% are used as-is.
pub fn weighted_fee_rate(schedule: &FeeSchedule, mix: &PaymentMix) -> f64 {
    match mix {
        PaymentMix::Single(method) => schedule.rate(*method),
        PaymentMix::Mix(_) => PaymentMethod::ALL
            .iter()
            .map(|method| schedule.rate(*method) * mix.share(*method))
            .sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MethodValues;

    fn schedule() -> FeeSchedule {
        FeeSchedule {
            fee_pct: MethodValues::new(1.0, 2.2, 1.3, 3.5, 3.5),
            fixed_fee: 1.0,
            vat_pct: 15.0,
        }
    }

    #[test]
    fn single_method_returns_its_rate() {
        let rate = weighted_fee_rate(&schedule(), &PaymentMix::Single(PaymentMethod::Visa));
        assert!((rate - 0.022).abs() < 1e-12);
    }

    #[test]
    fn default_mix_blends_to_1_89_percent() {
        let mix = PaymentMix::Mix(MethodValues::new(40.0, 30.0, 10.0, 10.0, 10.0));
        let rate = weighted_fee_rate(&schedule(), &mix);
        assert!((rate - 0.0189).abs() < 1e-12, "got {}", rate);
    }

    #[test]
    fn equal_rates_return_that_rate() {
        let flat = FeeSchedule {
            fee_pct: MethodValues::new(2.0, 2.0, 2.0, 2.0, 2.0),
            ..schedule()
        };
        let mix = PaymentMix::Mix(MethodValues::new(5.0, 15.0, 30.0, 25.0, 25.0));
        assert!((weighted_fee_rate(&flat, &mix) - 0.02).abs() < 1e-12);
    }

    #[test]
    fn unbalanced_shares_are_not_corrected() {
        // 50% of volume missing: the blended rate is halved
        let flat = FeeSchedule {
            fee_pct: MethodValues::new(2.0, 2.0, 2.0, 2.0, 2.0),
            ..schedule()
        };
        let mix = PaymentMix::Mix(MethodValues::new(25.0, 25.0, 0.0, 0.0, 0.0));
        assert!((weighted_fee_rate(&flat, &mix) - 0.01).abs() < 1e-12);
    }
}
