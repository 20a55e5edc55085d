//! Vault Risk Models
//!
//! Closed-form models behind a DeFi vault's risk parameters. Every function is
//! a pure computation over its explicit arguments: no I/O, no caches, no
//! mutable module state.
//!
//! # Allocation
//!
//! - [`calculate_c_score`]: geometric-mean composite score
//! - [`component_max_weight_bp`]: per-pool cap decaying with pool count
//! - [`target_weights`]: proportional weights with iterative capping
//! - [`target_allocations`]: weights applied to a capital amount
//!
//! # Liquidity
//!
//! - [`target_liquidity_ratio_bp`]: liquid share of TVL, decaying with TVL
//! - [`liquidity_triggers`]: low/high rebalance thresholds
//!
//! # Slippage
//!
//! - [`calculate_ratio_diff0`]: does a transaction move the vault towards its target ratio?
//! - [`calculate_slippage`]: power-curve slippage from the ratio deviation
//!
//! # Failure policy
//!
//! Only the `validate_*` functions return errors. All other functions map
//! degenerate input (NaN, non-positive balances, empty or all-zero scores) to
//! sentinel outputs: 0, an empty vector, or a bounds-clamped value.
//!
//! # Example
//!
//! ```rust
//! use vault_core::{Pool, WeightModel};
//! use vault_models::weight::allocate;
//!
//! let model = WeightModel::default();
//! let pools = vec![
//!     Pool::new("eth-usdc", 8_500),
//!     Pool::new("btc-usdc", 7_200),
//!     Pool::new("sol-usdc", 6_800),
//!     Pool::new("arb-usdc", 5_500),
//! ];
//!
//! let allocation = allocate(&model, &pools, 10_000_000.0);
//! assert_eq!(allocation.total_weight(), 10_000);
//! assert_eq!(allocation.largest(), Some(0));
//! ```

pub mod curves;
pub mod liquidity;
pub mod slippage;
pub mod validation;
pub mod weight;

// Re-export commonly used items
pub use curves::{
    TvlScale, generate_liquidity_curve_data, generate_max_weight_curve_data,
    generate_ratio_diff0_curve_data, generate_ratio_diff0_curve_data_both,
    generate_slippage_curve_data,
};
pub use liquidity::{LiquidityTriggers, evaluate_liquidity, liquidity_triggers, target_liquidity_ratio_bp};
pub use slippage::{RatioDiff0Input, calculate_ratio_diff0, calculate_slippage, slippage_for};
pub use validation::{Validate, validate_liquidity_model, validate_slippage_model, validate_weight_model};
pub use weight::{
    Allocation, MAX_CAPPING_ITERATIONS, allocate, calculate_c_score, component_max_weight_bp,
    target_allocations, target_weights,
};
