use serde::{Deserialize, Serialize};

use super::WeightModel;
use crate::values::{Bps, clamp_bp};

/// Pool identifier (display / identity only)
pub type PoolId = String;

/// A liquidity pool the vault can allocate to
///
/// Order inside a vault's pool list is identity order: output weight and
/// allocation arrays correspond by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub id: PoolId,
    /// Composite quality score, 0..=10000
    pub c_score: Bps,
}

impl Pool {
    pub fn new(id: impl Into<PoolId>, c_score: Bps) -> Self {
        Self {
            id: id.into(),
            c_score: clamp_bp(c_score),
        }
    }

    /// New pool scored with the model's default composite score
    pub fn with_default_score(id: impl Into<PoolId>, model: &WeightModel) -> Self {
        Self::new(id, model.default_c_score)
    }
}

/// Extract the score column from a pool list
pub fn scores(pools: &[Pool]) -> Vec<Bps> {
    pools.iter().map(|p| p.c_score).collect()
}
