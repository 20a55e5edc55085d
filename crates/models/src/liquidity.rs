//! Liquidity Buffer Model
//!
//! Target share of TVL kept liquid:
//!
//! ratio = m + (1 − m) × (1 + TVL × f)^(−e)
//!
//! Where:
//! - m = minimum ratio (asymptote as TVL → ∞)
//! - f = TVL factor
//! - e = TVL exponent
//!
//! Small vaults keep everything liquid (ratio = 100% at TVL 0); the buffer
//! shrinks towards `m` as the vault grows. Low/high triggers sit at a relative
//! offset below and above the target.

use serde::{Deserialize, Serialize};
use vault_core::{BPS_SCALE, Bps, LiquidityModel, LiquidityPoint, bp_to_fraction, fraction_to_bp};

/// Target liquidity ratio (BP) for a vault with `tvl_usd` locked
///
/// Returns 10000 when `min_ratio_bp >= 10000`. Non-finite or negative TVL is
/// treated as an empty vault.
pub fn target_liquidity_ratio_bp(
    tvl_usd: f64,
    min_ratio_bp: Bps,
    tvl_factor_bp: Bps,
    tvl_exponent_bp: Bps,
) -> Bps {
    if min_ratio_bp >= BPS_SCALE {
        return BPS_SCALE;
    }

    let tvl = if tvl_usd.is_finite() && tvl_usd > 0.0 {
        tvl_usd
    } else {
        0.0
    };
    let min_ratio = bp_to_fraction(min_ratio_bp);
    let decay = (1.0 + tvl * bp_to_fraction(tvl_factor_bp)).powf(-bp_to_fraction(tvl_exponent_bp));

    fraction_to_bp(min_ratio + (1.0 - min_ratio) * decay)
}

/// Rebalance thresholds around a target ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityTriggers {
    pub low_trigger: Bps,
    pub high_trigger: Bps,
}

/// Low/high triggers: target × (1 ∓ offset)
///
/// Not clamped. Extreme offsets can give a negative low trigger or a high
/// trigger above 10000; callers treat both as advisory values.
pub fn liquidity_triggers(target_ratio_bp: Bps, low_offset_bp: Bps, high_offset_bp: Bps) -> LiquidityTriggers {
    let target = target_ratio_bp as f64;
    LiquidityTriggers {
        low_trigger: (target * (1.0 - bp_to_fraction(low_offset_bp))).round() as Bps,
        high_trigger: (target * (1.0 + bp_to_fraction(high_offset_bp))).round() as Bps,
    }
}

/// Target ratio and triggers for a vault under `model`
pub fn evaluate_liquidity(model: &LiquidityModel, tvl_usd: f64) -> LiquidityPoint {
    let target_ratio = target_liquidity_ratio_bp(
        tvl_usd,
        model.min_ratio_bp,
        model.tvl_factor_bp,
        model.tvl_exponent_bp,
    );
    let triggers = liquidity_triggers(target_ratio, model.low_offset_bp, model.high_offset_bp);

    LiquidityPoint {
        tvl_usd,
        target_ratio,
        low_trigger: triggers.low_trigger,
        high_trigger: triggers.high_trigger,
    }
}
