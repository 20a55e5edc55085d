//! Curve Samplers
//!
//! Discretize each model over its input domain for charting. Deterministic and
//! stateless: the same inputs always give the same sequence.
//!
//! | Sampler | Domain |
//! |---|---|
//! | max weight | pool count 1..=N |
//! | liquidity | TVL, linear from $0 or log-spaced from $1 |
//! | slippage | ratioDiff0 -10000..=10000 |
//! | ratioDiff0 | user token0 share 0..=10000 |
//!
//! `samples` counts points including both endpoints; 0 gives an empty curve
//! and 1 gives the domain start only.

use serde::{Deserialize, Serialize};
use vault_core::{
    BPS_SCALE, Bps, LiquidityModel, LiquidityPoint, MaxWeightPoint, RatioDiff0Point,
    RatioDiff0Sample, SlippageModel, SlippagePoint, WeightModel,
};

use crate::liquidity::evaluate_liquidity;
use crate::slippage::{RatioDiff0Input, slippage_for};
use crate::weight::component_max_weight_bp;

/// Spacing of TVL samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TvlScale {
    /// Evenly spaced from $0
    #[default]
    Linear,
    /// Evenly spaced in log10 from $1
    Log,
}

/// `samples` evenly spaced values from `start` to `end`, both inclusive
fn sample_points(start: f64, end: f64, samples: usize) -> impl Iterator<Item = f64> {
    let step = if samples > 1 {
        (end - start) / (samples - 1) as f64
    } else {
        0.0
    };
    (0..samples).map(move |i| {
        if samples > 1 && i == samples - 1 {
            end
        } else {
            start + step * i as f64
        }
    })
}

pub fn generate_max_weight_curve_data(model: &WeightModel, max_components: u32) -> Vec<MaxWeightPoint> {
    (1..=max_components)
        .map(|components| MaxWeightPoint {
            components,
            max_weight: component_max_weight_bp(
                components,
                model.min_max_bp,
                model.diversification_factor_bp,
                model.max_bp,
            ),
        })
        .collect()
}

/// Target ratio and triggers across TVL
///
/// Non-finite or non-positive `max_tvl_usd` gives an empty curve.
pub fn generate_liquidity_curve_data(
    model: &LiquidityModel,
    max_tvl_usd: f64,
    samples: usize,
    scale: TvlScale,
) -> Vec<LiquidityPoint> {
    if !(max_tvl_usd.is_finite() && max_tvl_usd > 0.0) {
        return Vec::new();
    }

    let tvls: Vec<f64> = match scale {
        TvlScale::Linear => sample_points(0.0, max_tvl_usd, samples).collect(),
        TvlScale::Log => sample_points(0.0, max_tvl_usd.log10(), samples)
            .map(|exponent| 10f64.powf(exponent))
            .collect(),
    };

    tvls.into_iter()
        .map(|tvl| evaluate_liquidity(model, tvl))
        .collect()
}

pub fn generate_slippage_curve_data(model: &SlippageModel, samples: usize) -> Vec<SlippagePoint> {
    sample_points(-(BPS_SCALE as f64), BPS_SCALE as f64, samples)
        .map(|rd| {
            let ratio_diff0 = rd.round() as Bps;
            SlippagePoint {
                ratio_diff0,
                slippage: slippage_for(model, ratio_diff0),
            }
        })
        .collect()
}

fn user_ratios(samples: usize) -> impl Iterator<Item = Bps> {
    sample_points(0.0, BPS_SCALE as f64, samples).map(|r| r.round() as Bps)
}

/// ratioDiff0 across the user's token0 share, one direction
///
/// `user_ratio0_bp` and `is_deposit` of `input` are overridden per point.
pub fn generate_ratio_diff0_curve_data(
    input: &RatioDiff0Input,
    samples: usize,
    is_deposit: bool,
) -> Vec<RatioDiff0Sample> {
    let directed = input.with_direction(is_deposit);
    user_ratios(samples)
        .map(|user_ratio0| RatioDiff0Sample {
            user_ratio0,
            ratio_diff0: directed.with_user_ratio0(user_ratio0).ratio_diff0(),
        })
        .collect()
}

/// ratioDiff0 across the user's token0 share, deposit and withdrawal together
pub fn generate_ratio_diff0_curve_data_both(input: &RatioDiff0Input, samples: usize) -> Vec<RatioDiff0Point> {
    user_ratios(samples)
        .map(|user_ratio0| {
            let at = input.with_user_ratio0(user_ratio0);
            RatioDiff0Point {
                user_ratio0,
                deposit: at.with_direction(true).ratio_diff0(),
                withdrawal: at.with_direction(false).ratio_diff0(),
            }
        })
        .collect()
}
