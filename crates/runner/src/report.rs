//! Dashboard report
//!
//! One snapshot of every model output for a scenario, ready to serialize.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vault_core::{
    BPS_SCALE, Bps, LiquidityPoint, MaxWeightPoint, PoolId, RatioDiff0Point, SlippagePoint,
    bp_to_fraction, bp_to_percent,
};
use vault_models::{
    RatioDiff0Input, allocate, evaluate_liquidity, generate_liquidity_curve_data,
    generate_max_weight_curve_data, generate_ratio_diff0_curve_data_both,
    generate_slippage_curve_data, slippage_for,
};

use crate::config::ScenarioConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub name: String,
    pub allocation: AllocationReport,
    pub liquidity: LiquidityReport,
    pub slippage: SlippageReport,
    pub curves: CurveReport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolAllocation {
    pub id: PoolId,
    pub c_score: Bps,
    pub weight_bp: Bps,
    pub weight_pct: Decimal,
    pub allocation_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationReport {
    pub max_weight_bp: Bps,
    pub pools: Vec<PoolAllocation>,
    pub total_weight_bp: Bps,
    /// Budget left over when the cap cannot hold it
    pub unallocated_bp: Bps,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityReport {
    pub tvl_usd: f64,
    pub target_ratio_bp: Bps,
    pub target_ratio_pct: Decimal,
    pub low_trigger_bp: Bps,
    pub high_trigger_bp: Bps,
    /// USD kept liquid at the target ratio
    pub target_liquid_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlippageReport {
    pub input: RatioDiff0Input,
    pub ratio_diff0_bp: Bps,
    pub slippage_bp: Bps,
    pub slippage_pct: Decimal,
    /// Slippage charged on the transaction amount
    pub slippage_cost_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveReport {
    pub max_weight: Vec<MaxWeightPoint>,
    pub liquidity: Vec<LiquidityPoint>,
    pub slippage: Vec<SlippagePoint>,
    pub ratio_diff0: Vec<RatioDiff0Point>,
}

impl DashboardReport {
    pub fn build(scenario: &ScenarioConfig) -> Self {
        Self {
            name: scenario.name.clone(),
            allocation: AllocationReport::build(scenario),
            liquidity: LiquidityReport::build(scenario),
            slippage: SlippageReport::build(scenario),
            curves: CurveReport::build(scenario),
        }
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

impl AllocationReport {
    fn build(scenario: &ScenarioConfig) -> Self {
        let allocation = allocate(&scenario.weight, &scenario.pools, scenario.simulation.vault_tvl_usd);
        let total_weight_bp = allocation.total_weight();

        let pools = scenario
            .pools
            .iter()
            .zip(allocation.weights.iter().zip(&allocation.allocations))
            .map(|(pool, (&weight_bp, &allocation_usd))| PoolAllocation {
                id: pool.id.clone(),
                c_score: pool.c_score,
                weight_bp,
                weight_pct: bp_to_percent(weight_bp),
                allocation_usd,
            })
            .collect();

        // An empty vault has nothing to leave unallocated
        let unallocated_bp = if scenario.pools.is_empty() {
            0
        } else {
            BPS_SCALE - total_weight_bp
        };

        Self {
            max_weight_bp: allocation.max_weight_bp,
            pools,
            total_weight_bp,
            unallocated_bp,
        }
    }
}

impl LiquidityReport {
    fn build(scenario: &ScenarioConfig) -> Self {
        let tvl_usd = scenario.simulation.vault_tvl_usd;
        let point = evaluate_liquidity(&scenario.liquidity, tvl_usd);

        Self {
            tvl_usd,
            target_ratio_bp: point.target_ratio,
            target_ratio_pct: bp_to_percent(point.target_ratio),
            low_trigger_bp: point.low_trigger,
            high_trigger_bp: point.high_trigger,
            target_liquid_usd: tvl_usd * bp_to_fraction(point.target_ratio),
        }
    }
}

impl SlippageReport {
    fn build(scenario: &ScenarioConfig) -> Self {
        let input = scenario.simulation.ratio_diff0_input();
        let ratio_diff0_bp = input.ratio_diff0();
        let slippage_bp = slippage_for(&scenario.slippage, ratio_diff0_bp);

        Self {
            input,
            ratio_diff0_bp,
            slippage_bp,
            slippage_pct: bp_to_percent(slippage_bp),
            slippage_cost_usd: input.user_amount_usd * bp_to_fraction(slippage_bp),
        }
    }
}

impl CurveReport {
    fn build(scenario: &ScenarioConfig) -> Self {
        let curves = &scenario.curves;
        let input = scenario.simulation.ratio_diff0_input();

        Self {
            max_weight: generate_max_weight_curve_data(&scenario.weight, curves.max_components),
            liquidity: generate_liquidity_curve_data(
                &scenario.liquidity,
                curves.max_tvl_usd,
                curves.tvl_samples,
                curves.tvl_scale,
            ),
            slippage: generate_slippage_curve_data(&scenario.slippage, curves.slippage_samples),
            ratio_diff0: generate_ratio_diff0_curve_data_both(&input, curves.ratio_samples),
        }
    }
}
