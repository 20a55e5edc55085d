//! Sampled curve records
//!
//! Output-only values produced by the curve samplers for charting.

use serde::{Deserialize, Serialize};

use crate::values::Bps;

/// Per-pool cap for a given pool count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxWeightPoint {
    pub components: u32,
    pub max_weight: Bps,
}

/// Target liquidity ratio and triggers at a given TVL
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiquidityPoint {
    pub tvl_usd: f64,
    pub target_ratio: Bps,
    pub low_trigger: Bps,
    pub high_trigger: Bps,
}

/// Slippage charged for a given ratio deviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlippagePoint {
    pub ratio_diff0: Bps,
    pub slippage: Bps,
}

/// Ratio deviation for deposit and withdrawal at a given user token0 share
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioDiff0Point {
    pub user_ratio0: Bps,
    pub deposit: Bps,
    pub withdrawal: Bps,
}

/// Ratio deviation at a given user token0 share, one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioDiff0Sample {
    pub user_ratio0: Bps,
    pub ratio_diff0: Bps,
}
