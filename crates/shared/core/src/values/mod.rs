mod range;

pub use range::ParamRange;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Basis-point value: 10000 BP = 100%
///
/// Signed so that advisory outputs (e.g. liquidity triggers for extreme offsets)
/// can be represented outside `[0, 10000]` without wrapping.
pub type Bps = i64;

/// Number of basis points in one whole
pub const BPS_SCALE: Bps = 10_000;

/// Convert basis points to a plain fraction (10000 → 1.0)
#[inline]
pub fn bp_to_fraction(bp: Bps) -> f64 {
    bp as f64 / BPS_SCALE as f64
}

/// Convert a fraction to basis points, rounding half away from zero
///
/// Non-finite input maps to 0.
#[inline]
pub fn fraction_to_bp(fraction: f64) -> Bps {
    let bp = fraction * BPS_SCALE as f64;
    if !bp.is_finite() {
        return 0;
    }
    bp.round() as Bps
}

/// Clamp a basis-point value into `[0, 10000]`
#[inline]
pub fn clamp_bp(bp: Bps) -> Bps {
    bp.clamp(0, BPS_SCALE)
}

/// Exact fixed-point fraction for a BP value (2500 → 0.2500)
pub fn bp_to_decimal(bp: Bps) -> Decimal {
    Decimal::new(bp, 4)
}

/// Exact percentage for a BP value (2500 → 25.00)
pub fn bp_to_percent(bp: Bps) -> Decimal {
    Decimal::new(bp, 2)
}

/// Convert a fixed-point fraction back to basis points
///
/// Rounds half away from zero; values beyond the `i64` range saturate.
pub fn decimal_to_bp(fraction: Decimal) -> Bps {
    let scaled = fraction
        .checked_mul(Decimal::from(BPS_SCALE))
        .map(|d| d.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero));

    match scaled {
        Some(bp) => bp.to_i64().unwrap_or(if bp.is_sign_negative() {
            Bps::MIN
        } else {
            Bps::MAX
        }),
        None if fraction.is_sign_negative() => Bps::MIN,
        None => Bps::MAX,
    }
}
