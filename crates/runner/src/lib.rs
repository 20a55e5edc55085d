//! Vault Runner - Risk Dashboard Driver
//!
//! Wires the stateless models to a caller-owned parameter state:
//!
//! - **Config**: scenario loaded from JSON, every section optional
//! - **State**: clamping parameter store, or strict validation on load
//! - **Report**: allocation, liquidity, slippage and curve data as JSON
//!
//! ```text
//!   scenario.json ──► ScenarioConfig ──► DashboardState ──► DashboardReport ──► JSON
//!                                           │    ▲
//!                                 setters   │    │ clamped values
//!                                           ▼    │
//!                                       vault-models
//! ```

pub mod config;
pub mod error;
pub mod report;
pub mod state;

// Re-export main types
pub use config::{ConfigError, CurveSettings, ScenarioConfig, SimulationParams};
pub use error::{Result, RunnerError};
pub use report::{
    AllocationReport, CurveReport, DashboardReport, LiquidityReport, PoolAllocation, SlippageReport,
};
pub use state::DashboardState;
