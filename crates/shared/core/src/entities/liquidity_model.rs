use serde::{Deserialize, Serialize};

use crate::values::{BPS_SCALE, Bps, ParamRange};

/// Liquidity buffer parameters
///
/// The target ratio decays from 100% at zero TVL towards `min_ratio_bp`;
/// `tvl_factor_bp` and `tvl_exponent_bp` shape the decay. The offsets place the
/// low/high rebalance triggers around the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiquidityModel {
    pub min_ratio_bp: Bps,
    pub tvl_factor_bp: Bps,
    pub tvl_exponent_bp: Bps,
    pub low_offset_bp: Bps,
    pub high_offset_bp: Bps,
}

impl LiquidityModel {
    pub const MIN_RATIO_RANGE: ParamRange = ParamRange::new(0, BPS_SCALE);
    pub const TVL_FACTOR_RANGE: ParamRange = ParamRange::new(1, BPS_SCALE);
    pub const TVL_EXPONENT_RANGE: ParamRange = ParamRange::new(100, 20_000);
    pub const LOW_OFFSET_RANGE: ParamRange = ParamRange::new(500, BPS_SCALE);
    pub const HIGH_OFFSET_RANGE: ParamRange = ParamRange::new(500, BPS_SCALE);

    /// Copy with every field forced into range
    pub fn clamped(&self) -> Self {
        Self {
            min_ratio_bp: Self::MIN_RATIO_RANGE.clamp(self.min_ratio_bp),
            tvl_factor_bp: Self::TVL_FACTOR_RANGE.clamp(self.tvl_factor_bp),
            tvl_exponent_bp: Self::TVL_EXPONENT_RANGE.clamp(self.tvl_exponent_bp),
            low_offset_bp: Self::LOW_OFFSET_RANGE.clamp(self.low_offset_bp),
            high_offset_bp: Self::HIGH_OFFSET_RANGE.clamp(self.high_offset_bp),
        }
    }
}

impl Default for LiquidityModel {
    fn default() -> Self {
        Self {
            min_ratio_bp: 1_000,
            tvl_factor_bp: 1,
            tvl_exponent_bp: 5_000,
            low_offset_bp: 2_000,
            high_offset_bp: 2_000,
        }
    }
}
