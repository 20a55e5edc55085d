//! Capital Allocation Model
//!
//! Splits a vault's capital across its pools in three steps:
//!
//! 1. **Composite score**: geometric mean of a pool's sub-scores. A single
//!    failing dimension (score 0) zeroes the composite.
//! 2. **Dynamic max weight**: the per-pool cap decays exponentially with the
//!    number of pools,
//!    cap(n) = min(max, minMax + 10000 × e^(−n × diversification))
//! 3. **Target weights**: raw weight = (score/10000)^amplifier, normalized to
//!    the budget, then capped iteratively with the excess redistributed over
//!    the pools still below the cap.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use vault_core::{BPS_SCALE, Bps, Pool, WeightModel, bp_to_fraction, clamp_bp, fraction_to_bp};

/// Upper bound on capping passes in [`target_weights`]
pub const MAX_CAPPING_ITERATIONS: usize = 10;

/// Excess below this (in weight units) counts as converged
const CAPPING_EPSILON: f64 = 1e-9;

/// Composite score: geometric mean of BP scores
///
/// Empty input gives 0, a single score is returned unchanged (after clamping
/// into `[0, 10000]`), and any zero score gives 0.
pub fn calculate_c_score(scores: &[Bps]) -> Bps {
    match scores {
        [] => 0,
        [single] => clamp_bp(*single),
        _ => {
            if scores.iter().any(|&s| s <= 0) {
                return 0;
            }
            // Mean of logs rather than the raw product: long score lists would
            // otherwise underflow towards zero.
            let log_sum: f64 = scores
                .iter()
                .map(|&s| bp_to_fraction(clamp_bp(s)).ln())
                .sum();
            fraction_to_bp((log_sum / scores.len() as f64).exp())
        }
    }
}

/// Per-pool weight cap for a vault holding `components` pools
///
/// Non-increasing in `components`, tends to `min_max_bp`, never above `max_bp`.
pub fn component_max_weight_bp(
    components: u32,
    min_max_bp: Bps,
    diversification_factor_bp: Bps,
    max_bp: Bps,
) -> Bps {
    let decay = (-(components as f64) * bp_to_fraction(diversification_factor_bp)).exp();
    max_bp.min(min_max_bp.saturating_add(fraction_to_bp(decay)))
}

/// How the capping loop finished
#[derive(Debug, Clone, Copy, PartialEq)]
enum CappingOutcome {
    /// No entry above the cap
    Converged { passes: usize },
    /// Every positive entry is capped; `unallocated` weight had nowhere to go
    Saturated { unallocated: f64 },
    /// Iteration bound reached with entries still above the cap
    Exhausted,
}

/// Target weights for the given scores
///
/// Each weight is at most `max_weight_bp / 10000 × total_weight_bp` and the
/// weights sum to `total_weight_bp`, unless the caps are collectively too
/// tight (`cap × n < total`), in which case every pool sits at the cap and the
/// remainder stays unallocated.
///
/// Never fails: empty input gives an empty vector, all-zero scores (or a
/// non-positive budget) give all zeros.
pub fn target_weights(
    c_scores: &[Bps],
    max_weight_bp: Bps,
    total_weight_bp: Bps,
    score_amplifier_bp: Bps,
) -> Vec<Bps> {
    if c_scores.is_empty() {
        return Vec::new();
    }

    let amplifier = bp_to_fraction(score_amplifier_bp);
    let raw: Vec<f64> = c_scores
        .iter()
        .map(|&score| match clamp_bp(score) {
            0 => 0.0,
            s => bp_to_fraction(s).powf(amplifier),
        })
        .collect();

    let raw_total: f64 = raw.iter().sum();
    if !(raw_total.is_finite() && raw_total > 0.0) || total_weight_bp <= 0 {
        debug!("No allocation: raw_total={}, budget={}", raw_total, total_weight_bp);
        return vec![0; c_scores.len()];
    }

    let total = total_weight_bp as f64;
    let mut weights: Vec<f64> = raw.iter().map(|w| w / raw_total * total).collect();
    let cap = max_weight_bp.max(0) as f64 * total / BPS_SCALE as f64;

    match apply_caps(&mut weights, cap, MAX_CAPPING_ITERATIONS) {
        CappingOutcome::Converged { passes } => {
            debug!("Capping converged: pools={}, cap={:.4}, passes={}", weights.len(), cap, passes);
        }
        CappingOutcome::Saturated { unallocated } => {
            warn!(
                "Caps too tight for budget: pools={}, cap={:.4}, budget={}, unallocated={:.4}",
                weights.len(),
                cap,
                total_weight_bp,
                unallocated
            );
        }
        CappingOutcome::Exhausted => {
            warn!(
                "Capping did not converge within {} passes: pools={}, cap={:.4}",
                MAX_CAPPING_ITERATIONS,
                weights.len(),
                cap
            );
        }
    }

    round_preserving_sum(&weights, cap)
}

/// Clamp entries to `cap` and push the excess to the uncapped entries,
/// for at most `max_passes` passes
fn apply_caps(weights: &mut [f64], cap: f64, max_passes: usize) -> CappingOutcome {
    let mut capped = vec![false; weights.len()];

    for pass in 1..=max_passes {
        let mut excess = 0.0;
        for (w, is_capped) in weights.iter_mut().zip(capped.iter_mut()) {
            if *w > cap + CAPPING_EPSILON {
                excess += *w - cap;
                *w = cap;
                *is_capped = true;
            }
        }

        if excess <= CAPPING_EPSILON {
            return CappingOutcome::Converged { passes: pass };
        }

        let receiving: f64 = weights
            .iter()
            .zip(&capped)
            .filter(|&(w, is_capped)| !*is_capped && *w < cap)
            .map(|(w, _)| *w)
            .sum();

        if receiving <= CAPPING_EPSILON {
            return CappingOutcome::Saturated { unallocated: excess };
        }

        for (w, is_capped) in weights.iter_mut().zip(&capped) {
            if !*is_capped && *w < cap {
                *w += excess * *w / receiving;
            }
        }
    }

    if weights.iter().any(|&w| w > cap + CAPPING_EPSILON) {
        CappingOutcome::Exhausted
    } else {
        CappingOutcome::Converged { passes: max_passes }
    }
}

/// Round to whole units and hand the rounding residual to one entry
///
/// No entry ends above the whole-unit cap. The residual goes to the largest
/// weight (lowest index on ties). If that entry cannot take it without leaving
/// `[0, cap]`, the next largest positive entry that can is used instead. When
/// no single entry can absorb it, it is spread in the same order as far as the
/// room allows and any remainder stays unallocated.
fn round_preserving_sum(weights: &[f64], cap: f64) -> Vec<Bps> {
    let cap_units = (cap + CAPPING_EPSILON).floor() as Bps;
    let mut rounded: Vec<Bps> = weights
        .iter()
        .map(|w| (w.round() as Bps).min(cap_units))
        .collect();
    let target = weights.iter().sum::<f64>().round() as Bps;
    let rounded_total = rounded.iter().fold(0, |acc: Bps, &w| acc.saturating_add(w));
    let residual = target.saturating_sub(rounded_total);

    if residual == 0 || rounded.is_empty() {
        return rounded;
    }

    let mut order: Vec<usize> = (0..rounded.len()).collect();
    order.sort_by(|&a, &b| rounded[b].cmp(&rounded[a]).then(a.cmp(&b)));

    // Room to move in the residual's direction, zero-weight entries excluded
    let room = |rounded: &[Bps], i: usize| -> Bps {
        if weights[i] <= 0.0 {
            0
        } else if residual > 0 {
            cap_units.saturating_sub(rounded[i]).max(0)
        } else {
            rounded[i].max(0)
        }
    };

    if let Some(i) = order
        .iter()
        .copied()
        .find(|&i| room(&rounded, i) >= residual.saturating_abs())
    {
        rounded[i] = rounded[i].saturating_add(residual);
        return rounded;
    }

    let mut remaining = residual.saturating_abs();
    for &i in &order {
        if remaining == 0 {
            break;
        }
        let step = room(&rounded, i).min(remaining);
        rounded[i] = rounded[i].saturating_add(step * residual.signum());
        remaining -= step;
    }
    if remaining > 0 {
        debug!("Rounding residual left unallocated: {}", remaining);
    }
    rounded
}

/// Absolute capital per pool: `amount × weight / 10000`
///
/// Inherits every property of [`target_weights`] over a 10000 BP budget.
/// A non-finite or negative amount gives all zeros.
pub fn target_allocations(
    c_scores: &[Bps],
    amount: f64,
    max_weight_bp: Bps,
    score_amplifier_bp: Bps,
) -> Vec<f64> {
    if !(amount.is_finite() && amount >= 0.0) {
        return vec![0.0; c_scores.len()];
    }

    target_weights(c_scores, max_weight_bp, BPS_SCALE, score_amplifier_bp)
        .into_iter()
        .map(|w| amount * bp_to_fraction(w))
        .collect()
}

/// Full allocation of a vault's capital under a weight model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Per-pool cap for this pool count
    pub max_weight_bp: Bps,
    /// Target weight per pool (index order of the input pools)
    pub weights: Vec<Bps>,
    /// Capital per pool in USD
    pub allocations: Vec<f64>,
}

impl Allocation {
    /// Sum of weights; below 10000 only when the caps are infeasible
    pub fn total_weight(&self) -> Bps {
        self.weights.iter().sum()
    }

    /// Index of the pool with the largest weight (lowest index on ties)
    pub fn largest(&self) -> Option<usize> {
        self.weights
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, Bps)>, (i, &w)| match best {
                Some((_, bw)) if bw >= w => best,
                _ => Some((i, w)),
            })
            .map(|(i, _)| i)
    }
}

/// Allocate `amount` across `pools` using the model's dynamic cap
pub fn allocate(model: &WeightModel, pools: &[Pool], amount: f64) -> Allocation {
    let components = u32::try_from(pools.len()).unwrap_or(u32::MAX);
    let max_weight_bp = component_max_weight_bp(
        components,
        model.min_max_bp,
        model.diversification_factor_bp,
        model.max_bp,
    );
    let scores = vault_core::pool_scores(pools);
    let weights = target_weights(&scores, max_weight_bp, BPS_SCALE, model.score_amplifier_bp);
    let allocations = if amount.is_finite() && amount >= 0.0 {
        weights.iter().map(|&w| amount * bp_to_fraction(w)).collect()
    } else {
        vec![0.0; weights.len()]
    };

    Allocation {
        max_weight_bp,
        weights,
        allocations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const AMPLIFIER: Bps = 15_000;

    #[test]
    fn test_c_score_zero_sensitivity() {
        assert_eq!(calculate_c_score(&[10_000, 10_000, 0]), 0);
        assert_eq!(calculate_c_score(&[0, 9_000]), 0);
    }

    #[test]
    fn test_c_score_identity() {
        assert_eq!(calculate_c_score(&[]), 0);
        assert_eq!(calculate_c_score(&[6_321]), 6_321);
        assert_eq!(calculate_c_score(&[7_500, 7_500, 7_500]), 7_500);
    }

    #[test]
    fn test_c_score_geometric_mean() {
        // sqrt(0.64 × 0.81) = 0.72
        assert_eq!(calculate_c_score(&[6_400, 8_100]), 7_200);
        // Geometric mean never exceeds the arithmetic mean
        assert!(calculate_c_score(&[2_000, 9_000]) < 5_500);
    }

    #[test]
    fn test_max_weight_at_zero_components() {
        assert_eq!(component_max_weight_bp(0, 2_500, 3_000, 10_000), 10_000);
        assert_eq!(component_max_weight_bp(0, 0, 3_000, 20_000), 10_000);
    }

    #[test]
    fn test_max_weight_decay() {
        // 2500 + round(10000 × e^-1.2) = 2500 + 3012
        assert_eq!(component_max_weight_bp(4, 2_500, 3_000, 10_000), 5_512);
        // Asymptote
        assert_eq!(component_max_weight_bp(200, 2_500, 3_000, 10_000), 2_500);
    }

    #[test]
    fn test_max_weight_monotonic() {
        let mut previous = component_max_weight_bp(0, 2_500, 3_000, 10_000);
        for n in 1..50 {
            let current = component_max_weight_bp(n, 2_500, 3_000, 10_000);
            assert!(current <= previous, "n={n}: {current} > {previous}");
            previous = current;
        }
    }

    #[test]
    fn test_target_weights_degenerate() {
        assert!(target_weights(&[], 5_000, 10_000, AMPLIFIER).is_empty());
        assert_eq!(target_weights(&[0, 0, 0], 5_000, 10_000, AMPLIFIER), vec![0, 0, 0]);
        assert_eq!(target_weights(&[5_000, 5_000], 5_000, 0, AMPLIFIER), vec![0, 0]);
    }

    #[test]
    fn test_target_weights_uncapped_proportional() {
        let weights = target_weights(&[8_500, 7_200, 6_800, 5_500], 10_000, 10_000, AMPLIFIER);
        assert_eq!(weights.iter().sum::<Bps>(), 10_000);
        assert!(weights.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_target_weights_equal_scores() {
        let weights = target_weights(&[6_000; 4], 10_000, 10_000, AMPLIFIER);
        assert_eq!(weights, vec![2_500; 4]);
    }

    #[test]
    fn test_target_weights_capping_redistributes() {
        // Dominant pool would take ~78% uncapped
        let weights = target_weights(&[10_000, 3_000, 3_000], 5_000, 10_000, AMPLIFIER);
        assert_eq!(weights[0], 5_000);
        assert_eq!(weights[1], 2_500);
        assert_eq!(weights[2], 2_500);
    }

    #[test]
    fn test_target_weights_cascading_caps() {
        let weights = target_weights(&[10_000, 9_500, 2_000, 1_000], 3_500, 10_000, AMPLIFIER);
        assert_eq!(weights.iter().sum::<Bps>(), 10_000);
        assert!(weights.iter().all(|&w| w <= 3_500), "{weights:?}");
    }

    #[test]
    fn test_target_weights_zero_score_gets_nothing() {
        let weights = target_weights(&[9_000, 0, 4_000], 6_000, 10_000, AMPLIFIER);
        assert_eq!(weights[1], 0);
        assert_eq!(weights.iter().sum::<Bps>(), 10_000);
    }

    #[test]
    fn test_target_weights_infeasible_caps_under_allocate() {
        // Three pools capped at 20% can hold at most 60% of the budget
        let weights = target_weights(&[9_000, 8_000, 7_000], 2_000, 10_000, AMPLIFIER);
        assert_eq!(weights, vec![2_000, 2_000, 2_000]);
    }

    #[test]
    fn test_target_weights_custom_budget() {
        let weights = target_weights(&[10_000, 10_000], 10_000, 5_000, AMPLIFIER);
        assert_eq!(weights, vec![2_500, 2_500]);
    }

    #[test]
    fn test_rounding_residual_goes_to_largest() {
        // Three equal thirds: 3333.33 each, residual +1
        let weights = target_weights(&[7_000, 7_000, 7_000], 10_000, 10_000, AMPLIFIER);
        assert_eq!(weights, vec![3_334, 3_333, 3_333]);
    }

    #[test]
    fn test_fractional_cap_never_exceeded() {
        // cap = 3333 / 10000 × 5000 = 1666.5 units, three pools hold at most 3 × 1666
        let weights = target_weights(&[7_000, 7_000, 7_000], 3_333, 5_000, AMPLIFIER);
        assert_eq!(weights, vec![1_666, 1_666, 1_666]);
    }

    #[test]
    fn test_fractional_cap_residual_spreads_to_uncapped() {
        // Two pools sit at 1666.5 and the rounding remainder lands on the others
        let weights = target_weights(&[10_000, 10_000, 1_000, 1_000], 3_333, 5_000, AMPLIFIER);
        assert!(weights.iter().all(|&w| w <= 1_666), "{weights:?}");
        assert_eq!(weights.iter().sum::<Bps>(), 5_000);
    }

    #[test]
    fn test_extreme_bp_arguments_do_not_overflow() {
        assert_eq!(component_max_weight_bp(0, Bps::MAX, 3_000, Bps::MAX), Bps::MAX);
        assert_eq!(component_max_weight_bp(4, Bps::MAX, Bps::MAX, 10_000), 10_000);
        assert_eq!(component_max_weight_bp(0, Bps::MIN, 3_000, 10_000), Bps::MIN + 10_000);

        let weights = target_weights(&[5_000, 5_000], Bps::MAX, Bps::MAX, AMPLIFIER);
        assert_eq!(weights.len(), 2);
        assert_eq!(weights[0], weights[1]);
        assert!(weights[0] > 0);

        assert_eq!(target_weights(&[5_000, 5_000], Bps::MIN, 10_000, AMPLIFIER), vec![0, 0]);
        assert_eq!(calculate_c_score(&[Bps::MAX, Bps::MAX]), 10_000);
        assert_eq!(calculate_c_score(&[Bps::MIN, Bps::MAX]), 0);
    }

    #[test]
    fn test_capping_pass_bound_returns_current_distribution() {
        // Pass 1 caps the first entry and pushes the second over the cap;
        // a second pass would be needed to cap it
        let mut weights = vec![6_000.0, 3_000.0, 1_000.0];
        let outcome = apply_caps(&mut weights, 4_000.0, 1);

        assert_eq!(outcome, CappingOutcome::Exhausted);
        assert_relative_eq!(weights[0], 4_000.0);
        assert_relative_eq!(weights[1], 4_500.0);
        assert_relative_eq!(weights[2], 1_500.0);
        assert_relative_eq!(weights.iter().sum::<f64>(), 10_000.0, epsilon = 1e-9);

        let rounded = round_preserving_sum(&weights, 10_000.0);
        assert_eq!(rounded, vec![4_000, 4_500, 1_500]);
    }

    #[test]
    fn test_capping_converges_within_bound() {
        let mut weights = vec![6_000.0, 3_000.0, 1_000.0];
        let outcome = apply_caps(&mut weights, 4_000.0, MAX_CAPPING_ITERATIONS);

        assert_eq!(outcome, CappingOutcome::Converged { passes: 3 });
        assert_relative_eq!(weights[1], 4_000.0, epsilon = 1e-9);
        assert_relative_eq!(weights[2], 2_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_saturated_caps_report_unallocated() {
        let mut weights = vec![5_000.0, 5_000.0];
        let outcome = apply_caps(&mut weights, 3_000.0, MAX_CAPPING_ITERATIONS);
        match outcome {
            CappingOutcome::Saturated { unallocated } => assert_relative_eq!(unallocated, 4_000.0),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_allocations_proportional_to_weights() {
        let scores = [8_500, 7_200, 6_800, 5_500];
        let amount = 2_500_000.0;
        let weights = target_weights(&scores, 5_512, 10_000, AMPLIFIER);
        let allocations = target_allocations(&scores, amount, 5_512, AMPLIFIER);

        for (w, a) in weights.iter().zip(&allocations) {
            assert_relative_eq!(a / amount, *w as f64 / 10_000.0, epsilon = 1e-12);
        }
        assert_relative_eq!(allocations.iter().sum::<f64>(), amount, epsilon = 1e-6);
    }

    #[test]
    fn test_allocations_bad_amount() {
        assert_eq!(target_allocations(&[5_000, 5_000], f64::NAN, 10_000, AMPLIFIER), vec![0.0, 0.0]);
        assert_eq!(target_allocations(&[5_000], -1.0, 10_000, AMPLIFIER), vec![0.0]);
    }

    #[test]
    fn test_allocate_default_model() {
        let model = WeightModel::default();
        let pools = vec![
            Pool::new("a", 8_500),
            Pool::new("b", 7_200),
            Pool::new("c", 6_800),
            Pool::new("d", 5_500),
        ];
        let allocation = allocate(&model, &pools, 10_000_000.0);

        assert_eq!(allocation.max_weight_bp, 5_512);
        assert_eq!(allocation.total_weight(), 10_000);
        assert_eq!(allocation.largest(), Some(0));
        assert_relative_eq!(allocation.allocations.iter().sum::<f64>(), 10_000_000.0, epsilon = 1e-3);
    }

    #[test]
    fn test_allocate_empty_vault() {
        let allocation = allocate(&WeightModel::default(), &[], 1_000.0);
        assert_eq!(allocation.max_weight_bp, 10_000);
        assert!(allocation.weights.is_empty());
        assert_eq!(allocation.largest(), None);
    }
}
