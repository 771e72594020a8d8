//! Payment-mix share checks and normalization.

use thiserror::Error;

use crate::pricing::money::round2;
use crate::types::{non_negative, PaymentShares};

/// Allowed distance of the share total from 100 before it is flagged
pub const SHARE_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ShareError {
    #[error("payment shares sum to zero; enter at least one share above 0")]
    ZeroTotal,
}

/// Share total and whether it is close enough to 100
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShareCheck {
    pub total: f64,
    pub balanced: bool,
}

/// Negative shares count as 0, the same way pricing and normalization read them.
pub fn check_shares(shares: &PaymentShares) -> ShareCheck {
    let total = shares.map(non_negative).sum();
    ShareCheck {
        total,
        balanced: (total - 100.0).abs() <= SHARE_TOLERANCE,
    }
}

/// Rescale shares so they sum to 100, each rounded to 2 decimals.
///
/// Rounding can leave the total slightly off 100; that drift is left alone.
/// A zero total is refused and the caller keeps its shares.
pub fn normalize_shares(shares: &PaymentShares) -> Result<PaymentShares, ShareError> {
    let clamped = shares.map(non_negative);
    let total = clamped.sum();
    if total == 0.0 {
        return Err(ShareError::ZeroTotal);
    }

    let factor = 100.0 / total;
    Ok(clamped.map(|share| round2(share * factor)))
}
