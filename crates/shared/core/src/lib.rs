//! Vault Core Domain
//!
//! Plain value types shared by the vault risk models.
//! This crate contains no I/O and no mutable state; every record is constructed
//! by the caller, passed by value, and discarded after use.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Model parameter records
    LiquidityModel,
    // Curve samples
    LiquidityPoint,
    MaxWeightPoint,
    // Vault composition
    Pool,
    PoolId,
    pool_scores,
    RatioDiff0Point,
    RatioDiff0Sample,
    SlippageModel,
    SlippagePoint,
    WeightModel,
};
pub use values::{
    BPS_SCALE, Bps, ParamRange, bp_to_decimal, bp_to_fraction, bp_to_percent, clamp_bp,
    decimal_to_bp, fraction_to_bp,
};
