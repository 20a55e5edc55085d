//! Dashboard parameter state
//!
//! Owns the current scenario on behalf of the caller. This is the one place
//! where the validate-or-clamp policy is decided:
//!
//! - [`DashboardState::new`] and every setter clamp user input into range,
//!   the way interactive sliders behave
//! - [`DashboardState::strict`] validates the scenario and rejects it on the
//!   first violation
//!
//! The models themselves stay stateless; [`DashboardState::report`] calls them
//! fresh on the current values.

use log::{debug, warn};
use vault_core::{Bps, LiquidityModel, Pool, PoolId, SlippageModel, WeightModel, clamp_bp};
use vault_models::Validate;

use crate::config::{CurveSettings, ScenarioConfig, SimulationParams};
use crate::error::{Result, RunnerError};
use crate::report::DashboardReport;

/// Caller-owned dashboard state
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    scenario: ScenarioConfig,
}

impl DashboardState {
    /// Create state from a scenario, clamping every value into range
    pub fn new(scenario: ScenarioConfig) -> Self {
        let mut state = Self {
            scenario: ScenarioConfig {
                pools: Vec::with_capacity(scenario.pools.len()),
                ..scenario.clone()
            },
        };

        state.set_weight_model(scenario.weight);
        state.set_liquidity_model(scenario.liquidity);
        state.set_slippage_model(scenario.slippage);
        state.set_simulation(scenario.simulation);
        state.set_curves(scenario.curves);
        for pool in scenario.pools {
            state.add_scored_pool(pool.id, pool.c_score);
        }

        state
    }

    /// Create state from a scenario, rejecting any out-of-range value
    pub fn strict(scenario: ScenarioConfig) -> Result<Self> {
        scenario.weight.validate()?;
        scenario.liquidity.validate()?;
        scenario.slippage.validate()?;

        if let Some(pool) = scenario.pools.iter().find(|p| clamp_bp(p.c_score) != p.c_score) {
            return Err(RunnerError::InvalidPoolScore {
                id: pool.id.clone(),
                c_score: pool.c_score,
            });
        }

        Ok(Self { scenario })
    }

    pub fn scenario(&self) -> &ScenarioConfig {
        &self.scenario
    }

    pub fn pools(&self) -> &[Pool] {
        &self.scenario.pools
    }

    /// Apply a weight model, clamped; returns the applied model
    pub fn set_weight_model(&mut self, model: WeightModel) -> WeightModel {
        let applied = model.clamped();
        if applied != model {
            warn!("Weight model clamped: requested={:?}, applied={:?}", model, applied);
        }
        self.scenario.weight = applied;
        applied
    }

    /// Apply a liquidity model, clamped; returns the applied model
    pub fn set_liquidity_model(&mut self, model: LiquidityModel) -> LiquidityModel {
        let applied = model.clamped();
        if applied != model {
            warn!("Liquidity model clamped: requested={:?}, applied={:?}", model, applied);
        }
        self.scenario.liquidity = applied;
        applied
    }

    /// Apply a slippage model, clamped; returns the applied model
    pub fn set_slippage_model(&mut self, model: SlippageModel) -> SlippageModel {
        let applied = model.clamped();
        if applied != model {
            warn!("Slippage model clamped: requested={:?}, applied={:?}", model, applied);
        }
        self.scenario.slippage = applied;
        applied
    }

    /// Apply simulation inputs; ratios are clamped to [0, 10000] and
    /// non-finite or negative amounts become 0
    pub fn set_simulation(&mut self, params: SimulationParams) -> SimulationParams {
        let amount = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        let applied = SimulationParams {
            vault_tvl_usd: amount(params.vault_tvl_usd),
            vault_ratio0_bp: clamp_bp(params.vault_ratio0_bp),
            target_ratio0_bp: clamp_bp(params.target_ratio0_bp),
            user_amount_usd: amount(params.user_amount_usd),
            user_ratio0_bp: clamp_bp(params.user_ratio0_bp),
            is_deposit: params.is_deposit,
        };
        if applied != params {
            warn!("Simulation clamped: requested={:?}, applied={:?}", params, applied);
        }
        self.scenario.simulation = applied;
        applied
    }

    pub fn set_curves(&mut self, curves: CurveSettings) {
        self.scenario.curves = curves;
    }

    /// Add a pool scored with the weight model's default score
    pub fn add_pool(&mut self, id: impl Into<PoolId>) -> usize {
        let pool = Pool::with_default_score(id, &self.scenario.weight);
        self.add_scored_pool(pool.id, pool.c_score)
    }

    /// Add a pool with an explicit score (clamped); returns its index
    pub fn add_scored_pool(&mut self, id: impl Into<PoolId>, c_score: Bps) -> usize {
        let pool = Pool::new(id, c_score);
        if pool.c_score != c_score {
            warn!("Pool {} score clamped: requested={}, applied={}", pool.id, c_score, pool.c_score);
        }
        debug!("Pool added: id={}, c_score={}", pool.id, pool.c_score);
        self.scenario.pools.push(pool);
        self.scenario.pools.len() - 1
    }

    pub fn remove_pool(&mut self, index: usize) -> Result<Pool> {
        self.check_index(index)?;
        Ok(self.scenario.pools.remove(index))
    }

    /// Update a pool's score (clamped); returns the applied score
    pub fn set_pool_score(&mut self, index: usize, c_score: Bps) -> Result<Bps> {
        self.check_index(index)?;
        let applied = clamp_bp(c_score);
        if applied != c_score {
            warn!("Pool score clamped: index={}, requested={}, applied={}", index, c_score, applied);
        }
        self.scenario.pools[index].c_score = applied;
        Ok(applied)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.scenario.pools.len();
        if index < len {
            Ok(())
        } else {
            Err(RunnerError::PoolIndex { index, len })
        }
    }

    /// Recompute every model output for the current values
    pub fn report(&self) -> DashboardReport {
        DashboardReport::build(&self.scenario)
    }

    /// [`report`](Self::report) serialized to JSON
    pub fn report_json(&self, pretty: bool) -> Result<String> {
        Ok(self.report().to_json(pretty)?)
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(ScenarioConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_everything() {
        let scenario = ScenarioConfig {
            weight: WeightModel {
                score_amplifier_bp: 1_000,
                ..Default::default()
            },
            slippage: SlippageModel {
                min_slippage_bp: 200,
                max_slippage_bp: 100,
                amplification_bp: 3_500,
            },
            pools: vec![Pool {
                id: "hot".to_string(),
                c_score: 15_000,
            }],
            simulation: SimulationParams {
                vault_ratio0_bp: -10,
                user_amount_usd: f64::NAN,
                ..Default::default()
            },
            ..Default::default()
        };

        let state = DashboardState::new(scenario);
        let applied = state.scenario();
        assert!(applied.weight.is_valid());
        assert!(applied.slippage.is_valid());
        assert_eq!(applied.weight.score_amplifier_bp, 7_500);
        assert_eq!(applied.pools[0].c_score, 10_000);
        assert_eq!(applied.simulation.vault_ratio0_bp, 0);
        assert_eq!(applied.simulation.user_amount_usd, 0.0);
    }

    #[test]
    fn test_new_keeps_valid_scenario() {
        let scenario = ScenarioConfig::default();
        let state = DashboardState::new(scenario.clone());
        assert_eq!(state.scenario(), &scenario);
    }

    #[test]
    fn test_strict_rejects_ordering() {
        let scenario = ScenarioConfig {
            slippage: SlippageModel {
                min_slippage_bp: 200,
                max_slippage_bp: 100,
                amplification_bp: 3_500,
            },
            ..Default::default()
        };
        let err = DashboardState::strict(scenario).unwrap_err();
        match err {
            RunnerError::Validation(e) => assert!(e.is_ordering()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_rejects_pool_score() {
        let scenario = ScenarioConfig {
            pools: vec![Pool {
                id: "bad".to_string(),
                c_score: -1,
            }],
            ..Default::default()
        };
        assert!(matches!(
            DashboardState::strict(scenario),
            Err(RunnerError::InvalidPoolScore { c_score: -1, .. })
        ));
    }

    #[test]
    fn test_pool_editing() {
        let mut state = DashboardState::default();
        let index = state.add_pool("new-pool");
        assert_eq!(index, 4);
        assert_eq!(state.pools()[index].c_score, WeightModel::default().default_c_score);

        assert_eq!(state.set_pool_score(index, 12_000).unwrap(), 10_000);
        assert!(matches!(
            state.set_pool_score(9, 5_000),
            Err(RunnerError::PoolIndex { index: 9, len: 5 })
        ));

        let removed = state.remove_pool(0).unwrap();
        assert_eq!(removed.id, "eth-usdc");
        assert_eq!(state.pools().len(), 4);
    }

    #[test]
    fn test_report_json() {
        let state = DashboardState::default();
        let json = state.report_json(false).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["allocation"]["total_weight_bp"], 10_000);
        assert!(state.report_json(true).unwrap().contains('\n'));
    }

    #[test]
    fn test_output_error_message() {
        let source = serde_json::from_str::<u8>("not json").unwrap_err();
        let err = RunnerError::from(source);
        assert!(matches!(err, RunnerError::Output(_)));
        assert!(err.to_string().starts_with("Failed to serialize report"));
    }

    #[test]
    fn test_setters_return_applied_values() {
        let mut state = DashboardState::default();
        let applied = state.set_liquidity_model(LiquidityModel {
            low_offset_bp: 0,
            ..Default::default()
        });
        assert_eq!(applied.low_offset_bp, 500);
        assert_eq!(state.scenario().liquidity, applied);
    }
}
