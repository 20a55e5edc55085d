//! Scenario configuration
//!
//! A scenario is everything the dashboard needs to render one view: the three
//! model records, the vault's pools, the simulated transaction and the curve
//! sampling settings. Every section is optional in JSON and falls back to its
//! default.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use vault_core::{Bps, LiquidityModel, Pool, SlippageModel, WeightModel};
use vault_models::{RatioDiff0Input, TvlScale};

/// Root scenario configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Scenario name (shown in the report)
    #[serde(default = "default_scenario_name")]
    pub name: String,

    #[serde(default)]
    pub weight: WeightModel,

    #[serde(default)]
    pub liquidity: LiquidityModel,

    #[serde(default)]
    pub slippage: SlippageModel,

    /// Pools in display order
    #[serde(default = "default_pools")]
    pub pools: Vec<Pool>,

    #[serde(default)]
    pub simulation: SimulationParams,

    #[serde(default)]
    pub curves: CurveSettings,
}

fn default_scenario_name() -> String {
    "Default Vault".to_string()
}

fn default_pools() -> Vec<Pool> {
    vec![
        Pool::new("eth-usdc", 8_500),
        Pool::new("wbtc-usdc", 7_200),
        Pool::new("sol-usdc", 6_800),
        Pool::new("arb-usdc", 5_500),
    ]
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            name: default_scenario_name(),
            weight: WeightModel::default(),
            liquidity: LiquidityModel::default(),
            slippage: SlippageModel::default(),
            pools: default_pools(),
            simulation: SimulationParams::default(),
            curves: CurveSettings::default(),
        }
    }
}

impl ScenarioConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            source,
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Vault state and the transaction being priced
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Vault TVL in USD (allocation amount, liquidity sizing, ratio balance)
    pub vault_tvl_usd: f64,
    pub vault_ratio0_bp: Bps,
    pub target_ratio0_bp: Bps,
    pub user_amount_usd: f64,
    pub user_ratio0_bp: Bps,
    pub is_deposit: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            vault_tvl_usd: 10_000_000.0,
            vault_ratio0_bp: 5_000,
            target_ratio0_bp: 5_000,
            user_amount_usd: 100_000.0,
            user_ratio0_bp: 5_000,
            is_deposit: true,
        }
    }
}

impl SimulationParams {
    pub fn ratio_diff0_input(&self) -> RatioDiff0Input {
        RatioDiff0Input {
            vault_balance_usd: self.vault_tvl_usd,
            vault_ratio0_bp: self.vault_ratio0_bp,
            target_ratio0_bp: self.target_ratio0_bp,
            user_amount_usd: self.user_amount_usd,
            user_ratio0_bp: self.user_ratio0_bp,
            is_deposit: self.is_deposit,
        }
    }
}

/// Curve sampling settings for the charts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveSettings {
    /// Largest pool count on the max-weight chart
    pub max_components: u32,
    pub max_tvl_usd: f64,
    pub tvl_samples: usize,
    pub tvl_scale: TvlScale,
    pub slippage_samples: usize,
    pub ratio_samples: usize,
}

impl Default for CurveSettings {
    fn default() -> Self {
        Self {
            max_components: 20,
            max_tvl_usd: 100_000_000.0,
            tvl_samples: 50,
            tvl_scale: TvlScale::Log,
            slippage_samples: 41,
            ratio_samples: 21,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
