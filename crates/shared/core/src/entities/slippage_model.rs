use serde::{Deserialize, Serialize};

use crate::values::{BPS_SCALE, Bps, ParamRange};

/// Dynamic slippage parameters
///
/// Transactions that improve the vault's balance pay `min_slippage_bp`, those
/// that worsen it pay up to `max_slippage_bp`. `amplification_bp` bends the
/// curve between the two (5000 = linear).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlippageModel {
    pub min_slippage_bp: Bps,
    pub max_slippage_bp: Bps,
    pub amplification_bp: Bps,
}

impl SlippageModel {
    pub const MIN_SLIPPAGE_RANGE: ParamRange = ParamRange::new(0, 1_000);
    pub const MAX_SLIPPAGE_RANGE: ParamRange = ParamRange::new(0, 1_000);
    pub const AMPLIFICATION_RANGE: ParamRange = ParamRange::new(0, BPS_SCALE);

    /// Copy with every field forced into range
    ///
    /// Keeps `min_slippage_bp < max_slippage_bp` by pulling the minimum down
    /// (or, at the floor, pushing the maximum up) by one basis point.
    pub fn clamped(&self) -> Self {
        let mut min_slippage_bp = Self::MIN_SLIPPAGE_RANGE.clamp(self.min_slippage_bp);
        let mut max_slippage_bp = Self::MAX_SLIPPAGE_RANGE.clamp(self.max_slippage_bp);

        if min_slippage_bp >= max_slippage_bp {
            if max_slippage_bp > Self::MIN_SLIPPAGE_RANGE.min {
                min_slippage_bp = max_slippage_bp - 1;
            } else {
                max_slippage_bp = min_slippage_bp + 1;
            }
        }

        Self {
            min_slippage_bp,
            max_slippage_bp,
            amplification_bp: Self::AMPLIFICATION_RANGE.clamp(self.amplification_bp),
        }
    }
}

impl Default for SlippageModel {
    fn default() -> Self {
        Self {
            min_slippage_bp: 10,
            max_slippage_bp: 100,
            amplification_bp: 3_500,
        }
    }
}
