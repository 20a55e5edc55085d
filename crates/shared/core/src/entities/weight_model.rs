use serde::{Deserialize, Serialize};

use crate::values::{BPS_SCALE, Bps, ParamRange};

/// Capital allocation parameters
///
/// Drives composite scoring, the dynamic per-pool max weight and the
/// target-weight solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightModel {
    /// Score assigned to a newly added pool
    pub default_c_score: Bps,
    /// Exponent applied to pool scores (x10000)
    pub score_amplifier_bp: Bps,
    /// Floor the per-pool cap decays towards as pool count grows
    pub min_max_bp: Bps,
    /// Hard ceiling on any single pool's weight
    pub max_bp: Bps,
    /// Decay rate of the per-pool cap (x10000)
    pub diversification_factor_bp: Bps,
}

impl WeightModel {
    pub const DEFAULT_C_SCORE_RANGE: ParamRange = ParamRange::new(0, BPS_SCALE);
    pub const SCORE_AMPLIFIER_RANGE: ParamRange = ParamRange::new(7_500, 25_000);
    pub const MIN_MAX_RANGE: ParamRange = ParamRange::new(0, BPS_SCALE);
    pub const MAX_RANGE: ParamRange = ParamRange::new(0, BPS_SCALE);
    pub const DIVERSIFICATION_FACTOR_RANGE: ParamRange = ParamRange::new(500, 20_000);

    /// Copy with every field forced into range
    ///
    /// `min_max_bp` is lowered to `max_bp` when the two are out of order.
    pub fn clamped(&self) -> Self {
        let max_bp = Self::MAX_RANGE.clamp(self.max_bp);
        Self {
            default_c_score: Self::DEFAULT_C_SCORE_RANGE.clamp(self.default_c_score),
            score_amplifier_bp: Self::SCORE_AMPLIFIER_RANGE.clamp(self.score_amplifier_bp),
            min_max_bp: Self::MIN_MAX_RANGE.clamp(self.min_max_bp).min(max_bp),
            max_bp,
            diversification_factor_bp: Self::DIVERSIFICATION_FACTOR_RANGE
                .clamp(self.diversification_factor_bp),
        }
    }
}

impl Default for WeightModel {
    fn default() -> Self {
        Self {
            default_c_score: 5_000,
            score_amplifier_bp: 15_000,
            min_max_bp: 2_500,
            max_bp: 10_000,
            diversification_factor_bp: 3_000,
        }
    }
}
