//! Dynamic Slippage Model
//!
//! Two pieces:
//!
//! **Ratio deviation** (`ratioDiff0`): how much a deposit or withdrawal moves
//! a two-asset vault's token0 share towards its target,
//! ratioDiff0 = |r_old − target| − |r_new − target|
//! Positive = transaction improves the balance, negative = worsens it.
//!
//! **Slippage transform**: the deviation is mapped to `x ∈ [0, 1]` and bent by
//! a power curve with exponent k = 10^(|A − 5000| / 2500):
//! - A ≤ 5000: concave, t = 1 − (1 − x)^k
//! - A > 5000: convex, t = x^k
//!
//! slippage = max + (min − max) × t
//!
//! Both branches reduce to t = x at A = 5000, so the curve has no jump at the
//! midpoint.

use serde::{Deserialize, Serialize};
use vault_core::{BPS_SCALE, Bps, SlippageModel, bp_to_fraction, clamp_bp};

/// Amplification at which the transform is linear
pub const LINEAR_AMPLIFICATION_BP: Bps = 5_000;

/// A deposit or withdrawal against a two-asset vault
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioDiff0Input {
    /// Vault value in USD
    pub vault_balance_usd: f64,
    /// Current token0 share of the vault
    pub vault_ratio0_bp: Bps,
    /// Target token0 share
    pub target_ratio0_bp: Bps,
    /// Transaction value in USD
    pub user_amount_usd: f64,
    /// Token0 share of the transaction
    pub user_ratio0_bp: Bps,
    pub is_deposit: bool,
}

impl RatioDiff0Input {
    /// [`calculate_ratio_diff0`] for this transaction
    pub fn ratio_diff0(&self) -> Bps {
        calculate_ratio_diff0(
            self.vault_balance_usd,
            self.vault_ratio0_bp,
            self.target_ratio0_bp,
            self.user_amount_usd,
            self.user_ratio0_bp,
            self.is_deposit,
        )
    }

    /// Same transaction with a different token0 share
    pub fn with_user_ratio0(mut self, user_ratio0_bp: Bps) -> Self {
        self.user_ratio0_bp = user_ratio0_bp;
        self
    }

    /// Same transaction as a deposit (`true`) or withdrawal (`false`)
    pub fn with_direction(mut self, is_deposit: bool) -> Self {
        self.is_deposit = is_deposit;
        self
    }
}

/// Signed change in deviation from the target token0 ratio, in BP
///
/// Returns 0 for non-finite or non-positive `vault_balance` / `user_amount`.
/// Ratios are clamped into `[0, 10000]`; withdrawals floor each token balance
/// at 0. The result lies in `[-10000, 10000]`.
pub fn calculate_ratio_diff0(
    vault_balance: f64,
    vault_ratio0: Bps,
    target_ratio0: Bps,
    user_amount: f64,
    user_ratio0: Bps,
    is_deposit: bool,
) -> Bps {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(vault_balance) || !valid(user_amount) {
        return 0;
    }

    let vault_ratio = bp_to_fraction(clamp_bp(vault_ratio0));
    let target_ratio = bp_to_fraction(clamp_bp(target_ratio0));
    let user_ratio = bp_to_fraction(clamp_bp(user_ratio0));

    let balance0 = vault_balance * vault_ratio;
    let balance1 = vault_balance * (1.0 - vault_ratio);
    let user0 = user_amount * user_ratio;
    let user1 = user_amount * (1.0 - user_ratio);

    let (new0, new1) = if is_deposit {
        (balance0 + user0, balance1 + user1)
    } else {
        ((balance0 - user0).max(0.0), (balance1 - user1).max(0.0))
    };

    let new_total = new0 + new1;
    let new_ratio = if new_total > 0.0 { new0 / new_total } else { 0.0 };

    let old_deviation = (vault_ratio - target_ratio).abs();
    let new_deviation = (new_ratio - target_ratio).abs();
    let diff = ((old_deviation - new_deviation) * BPS_SCALE as f64).round();

    if !diff.is_finite() {
        return 0;
    }
    (diff as Bps).clamp(-BPS_SCALE, BPS_SCALE)
}

/// Power-curve exponent for an amplification value
pub(crate) fn curve_exponent(amplification_bp: Bps) -> f64 {
    let distance = (amplification_bp - LINEAR_AMPLIFICATION_BP).abs() as f64;
    10f64.powf(distance / 2_500.0)
}

pub(crate) fn concave_transform(x: f64, k: f64) -> f64 {
    1.0 - (1.0 - x).powf(k)
}

pub(crate) fn convex_transform(x: f64, k: f64) -> f64 {
    x.powf(k)
}

/// Slippage (BP) charged for a transaction with the given `ratioDiff0`
///
/// Bounded within `[min(min, max), max(min, max)]`. Out-of-domain
/// `ratio_diff0_bp` and `amplification_bp` are clamped first.
pub fn calculate_slippage(
    ratio_diff0_bp: Bps,
    min_slippage_bp: Bps,
    max_slippage_bp: Bps,
    amplification_bp: Bps,
) -> Bps {
    let ratio_diff0 = ratio_diff0_bp.clamp(-BPS_SCALE, BPS_SCALE);
    let amplification = clamp_bp(amplification_bp);

    let x = ((ratio_diff0 + BPS_SCALE) as f64 / (2 * BPS_SCALE) as f64).clamp(0.0, 1.0);
    let k = curve_exponent(amplification);
    let t = if amplification <= LINEAR_AMPLIFICATION_BP {
        concave_transform(x, k)
    } else {
        convex_transform(x, k)
    }
    .clamp(0.0, 1.0);

    let min = min_slippage_bp as f64;
    let max = max_slippage_bp as f64;
    let slippage = max + (min - max) * t;

    let lower = min_slippage_bp.min(max_slippage_bp);
    let upper = min_slippage_bp.max(max_slippage_bp);
    (slippage.round() as Bps).clamp(lower, upper)
}

/// Slippage under `model` for the given `ratioDiff0`
pub fn slippage_for(model: &SlippageModel, ratio_diff0_bp: Bps) -> Bps {
    calculate_slippage(
        ratio_diff0_bp,
        model.min_slippage_bp,
        model.max_slippage_bp,
        model.amplification_bp,
    )
}
