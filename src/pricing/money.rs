//! Display rounding for currency and percent figures.
//!
//! Computation stays in f64; only displayed values go through Decimal.

use rust_decimal::prelude::*;

/// Decimal places shown for money, percents and shares
pub const DISPLAY_DP: u32 = 2;

/// Round to 2 decimal places, half away from zero.
///
/// Non-finite values pass through unchanged.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Format a currency amount, `∞` for an unbounded price
pub fn format_amount(value: f64) -> String {
    if value.is_infinite() {
        "∞".to_string()
    } else {
        format!("{:.*}", DISPLAY_DP as usize, round2(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round2(173.1411229), 173.14);
        assert_eq!(round2(2.346), 2.35);
        assert_eq!(round2(-2.346), -2.35);
        assert_eq!(round2(0.125), 0.13);
    }

    #[test]
    fn infinity_passes_through() {
        assert!(round2(f64::INFINITY).is_infinite());
        assert_eq!(format_amount(f64::INFINITY), "∞");
        assert_eq!(format_amount(3.0), "3.00");
    }
}
