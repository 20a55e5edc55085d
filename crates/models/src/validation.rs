//! Parameter Validation
//!
//! Strict range and ordering checks for the three model records. These are
//! the only functions in the model layer that can fail; everything else
//! degrades to sentinel values. Inputs are never modified. Callers that prefer
//! clamping over rejection use the records' `clamped()` instead.

use vault_core::{LiquidityModel, SlippageModel, WeightModel};
use vault_ports::{OrderingRule, ValidationResult, check_ordering, check_range};

/// Validation seam for parameter records
pub trait Validate {
    /// First violated constraint, in field order
    fn validate(&self) -> ValidationResult<()>;

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

pub fn validate_weight_model(model: &WeightModel) -> ValidationResult<()> {
    check_range(
        "default_c_score",
        model.default_c_score,
        WeightModel::DEFAULT_C_SCORE_RANGE,
    )?;
    check_range(
        "score_amplifier_bp",
        model.score_amplifier_bp,
        WeightModel::SCORE_AMPLIFIER_RANGE,
    )?;
    check_range("min_max_bp", model.min_max_bp, WeightModel::MIN_MAX_RANGE)?;
    check_range("max_bp", model.max_bp, WeightModel::MAX_RANGE)?;
    check_range(
        "diversification_factor_bp",
        model.diversification_factor_bp,
        WeightModel::DIVERSIFICATION_FACTOR_RANGE,
    )?;
    check_ordering(
        ("min_max_bp", model.min_max_bp),
        ("max_bp", model.max_bp),
        OrderingRule::LessOrEqual,
    )
}

pub fn validate_liquidity_model(model: &LiquidityModel) -> ValidationResult<()> {
    check_range("min_ratio_bp", model.min_ratio_bp, LiquidityModel::MIN_RATIO_RANGE)?;
    check_range("tvl_factor_bp", model.tvl_factor_bp, LiquidityModel::TVL_FACTOR_RANGE)?;
    check_range(
        "tvl_exponent_bp",
        model.tvl_exponent_bp,
        LiquidityModel::TVL_EXPONENT_RANGE,
    )?;
    check_range("low_offset_bp", model.low_offset_bp, LiquidityModel::LOW_OFFSET_RANGE)?;
    check_range(
        "high_offset_bp",
        model.high_offset_bp,
        LiquidityModel::HIGH_OFFSET_RANGE,
    )
}

pub fn validate_slippage_model(model: &SlippageModel) -> ValidationResult<()> {
    check_range(
        "min_slippage_bp",
        model.min_slippage_bp,
        SlippageModel::MIN_SLIPPAGE_RANGE,
    )?;
    check_range(
        "max_slippage_bp",
        model.max_slippage_bp,
        SlippageModel::MAX_SLIPPAGE_RANGE,
    )?;
    check_range(
        "amplification_bp",
        model.amplification_bp,
        SlippageModel::AMPLIFICATION_RANGE,
    )?;
    check_ordering(
        ("min_slippage_bp", model.min_slippage_bp),
        ("max_slippage_bp", model.max_slippage_bp),
        OrderingRule::StrictlyLess,
    )
}

impl Validate for WeightModel {
    fn validate(&self) -> ValidationResult<()> {
        validate_weight_model(self)
    }
}

impl Validate for LiquidityModel {
    fn validate(&self) -> ValidationResult<()> {
        validate_liquidity_model(self)
    }
}

impl Validate for SlippageModel {
    fn validate(&self) -> ValidationResult<()> {
        validate_slippage_model(self)
    }
}
