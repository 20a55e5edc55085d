//! Invariant properties of the vault models
//!
//! Randomized checks for the properties every consumer relies on:
//! normalization, boundedness and monotonicity.

use proptest::prelude::*;
use vault_core::{BPS_SCALE, Bps};
use vault_models::{
    calculate_c_score, calculate_ratio_diff0, calculate_slippage, component_max_weight_bp,
    target_allocations, target_liquidity_ratio_bp, target_weights,
};

fn bp() -> impl Strategy<Value = Bps> {
    0..=BPS_SCALE
}

fn positive_scores() -> impl Strategy<Value = Vec<Bps>> {
    prop::collection::vec(1..=BPS_SCALE, 1..=8)
}

/// Scores plus a per-pool cap that can still hold the whole budget
fn scores_with_feasible_cap() -> impl Strategy<Value = (Vec<Bps>, Bps)> {
    positive_scores().prop_flat_map(|scores| {
        let n = scores.len() as Bps;
        let min_cap = (BPS_SCALE + n - 1) / n;
        (Just(scores), min_cap..=BPS_SCALE)
    })
}

fn amplifier() -> impl Strategy<Value = Bps> {
    7_500i64..=25_000i64
}

proptest! {
    #[test]
    fn prop_c_score_zero_sensitivity(
        mut scores in prop::collection::vec(bp(), 1..10),
        position in any::<prop::sample::Index>(),
    ) {
        let i = position.index(scores.len());
        scores[i] = 0;
        prop_assert_eq!(calculate_c_score(&scores), 0);
    }

    #[test]
    fn prop_c_score_identity(score in bp(), n in 1usize..8) {
        prop_assert_eq!(calculate_c_score(&[score]), score);
        prop_assert_eq!(calculate_c_score(&vec![score; n]), score);
    }

    #[test]
    fn prop_c_score_bounded_by_extremes(scores in positive_scores()) {
        let c = calculate_c_score(&scores);
        let lo = *scores.iter().min().unwrap();
        let hi = *scores.iter().max().unwrap();
        prop_assert!(c >= lo && c <= hi, "{} not in [{}, {}]", c, lo, hi);
    }

    #[test]
    fn prop_weights_sum_to_budget((scores, cap) in scores_with_feasible_cap(), amp in amplifier()) {
        let weights = target_weights(&scores, cap, BPS_SCALE, amp);
        prop_assert_eq!(weights.len(), scores.len());
        prop_assert_eq!(weights.iter().sum::<Bps>(), BPS_SCALE);
        for &w in &weights {
            prop_assert!(w >= 0 && w <= cap, "weight {} outside [0, {}]", w, cap);
        }
    }

    #[test]
    fn prop_weights_never_exceed_budget(
        scores in prop::collection::vec(bp(), 0..12),
        cap in bp(),
        amp in amplifier(),
    ) {
        let weights = target_weights(&scores, cap, BPS_SCALE, amp);
        prop_assert_eq!(weights.len(), scores.len());
        prop_assert!(weights.iter().sum::<Bps>() <= BPS_SCALE);
        prop_assert!(weights.iter().all(|&w| w >= 0));
    }

    #[test]
    fn prop_allocations_proportional(
        (scores, cap) in scores_with_feasible_cap(),
        amp in amplifier(),
        amount in 1.0f64..1e9,
    ) {
        let weights = target_weights(&scores, cap, BPS_SCALE, amp);
        let allocations = target_allocations(&scores, amount, cap, amp);
        for (w, a) in weights.iter().zip(&allocations) {
            let expected = *w as f64 / BPS_SCALE as f64;
            prop_assert!((a / amount - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn prop_max_weight_monotonic(
        n in 0u32..200,
        min_max in 0..=BPS_SCALE,
        diversification in 500..=20_000 as Bps,
        max in 0..=BPS_SCALE,
    ) {
        let here = component_max_weight_bp(n, min_max, diversification, max);
        let next = component_max_weight_bp(n + 1, min_max, diversification, max);
        prop_assert!(next <= here);
        prop_assert!(here <= max);
    }

    #[test]
    fn prop_slippage_bounded(
        ratio_diff0 in -BPS_SCALE..=BPS_SCALE,
        min in 0..=1_000 as Bps,
        max in 0..=1_000 as Bps,
        amp in bp(),
    ) {
        let s = calculate_slippage(ratio_diff0, min, max, amp);
        prop_assert!(s >= min.min(max) && s <= min.max(max));
    }

    #[test]
    fn prop_slippage_linear_at_midpoint(
        ratio_diff0 in -BPS_SCALE..=BPS_SCALE,
        min in 0..500 as Bps,
        spread in 1..=500 as Bps,
    ) {
        let max = min + spread;
        let x = (ratio_diff0 + BPS_SCALE) as f64 / (2 * BPS_SCALE) as f64;
        let linear = max as f64 + (min - max) as f64 * x;
        let s = calculate_slippage(ratio_diff0, min, max, 5_000);
        // Both branch formulas collapse to linear interpolation; allow for rounding at .5
        prop_assert!((s as f64 - linear).abs() <= 0.5 + 1e-9, "{} vs {}", s, linear);
    }

    #[test]
    fn prop_ratio_diff0_bounded(
        vault in prop::num::f64::ANY,
        vault_ratio in -20_000..=20_000 as Bps,
        target in -20_000..=20_000 as Bps,
        user in prop::num::f64::ANY,
        user_ratio in -20_000..=20_000 as Bps,
        is_deposit in any::<bool>(),
    ) {
        let rd = calculate_ratio_diff0(vault, vault_ratio, target, user, user_ratio, is_deposit);
        prop_assert!((-BPS_SCALE..=BPS_SCALE).contains(&rd));
    }

    #[test]
    fn prop_balanced_transaction_neutral(
        vault in 1.0f64..1e9,
        share in 0.0f64..0.5,
        ratio in bp(),
        is_deposit in any::<bool>(),
    ) {
        let user = vault * share;
        prop_assume!(user > 0.0);
        prop_assert_eq!(calculate_ratio_diff0(vault, ratio, ratio, user, ratio, is_deposit), 0);
    }

    #[test]
    fn prop_liquidity_ratio_non_increasing(
        tvl in 0.0f64..1e10,
        bump in 1.0f64..1e6,
        min_ratio in 0..BPS_SCALE,
        factor in 1..=BPS_SCALE,
        exponent in 100..=20_000 as Bps,
    ) {
        let here = target_liquidity_ratio_bp(tvl, min_ratio, factor, exponent);
        let further = target_liquidity_ratio_bp(tvl + bump, min_ratio, factor, exponent);
        prop_assert!(further <= here);
        prop_assert!(here >= min_ratio && here <= BPS_SCALE);
    }
}
