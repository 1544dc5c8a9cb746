use std::collections::HashSet;

use crate::catalog::{Spot, Tier};
use crate::playlist::weights::NormalizedWeights;

/// Stand-in loop requirement for a spot whose tier carries no weight. Large
/// enough to dominate any realistic loop, finite so the arithmetic stays
/// well-behaved. A loop driven by this bound is reported via
/// `LoopSolution::starved_tiers`.
pub const UNSATISFIABLE_LOOP_SECS: f64 = 1_000_000.0;

/// Solver output: the loop length plus the tiers that have spots but no
/// weight, so callers can warn that those spots cannot really be served.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopSolution {
    pub loop_duration_seconds: f64,
    pub starved_tiers: Vec<Tier>,
}

/// Computes the minimum loop length that gives every sponsor spot its
/// tier-proportional airtime and still fits all filler content into the
/// remaining share.
///
/// A spot needs `duration / (weight/100)` seconds of loop so that one play
/// of it equals its tier share; the loop must satisfy the largest such
/// requirement. Filler claims whatever percentage the occupied tiers leave
/// over, floored at 1% so an over-subscribed configuration (tier weights
/// summing past 100) degrades instead of exploding.
pub fn solve(
    tier_spots: &[&Spot],
    filler_spots: &[&Spot],
    weights: &NormalizedWeights,
) -> LoopSolution {
    let mut base_loop: f64 = 0.0;
    for spot in tier_spots {
        let weight = spot.kind.tier().map(|t| weights.get(t)).unwrap_or(0.0);
        let requirement = if weight > 0.0 {
            spot.duration_seconds / (weight / 100.0)
        } else {
            UNSATISFIABLE_LOOP_SECS
        };
        base_loop = base_loop.max(requirement);
    }

    // A tier's weight only counts toward the sponsor share when at least
    // one spot actually occupies that tier.
    let occupied: HashSet<Tier> = tier_spots.iter().filter_map(|s| s.kind.tier()).collect();
    let tier_weight_sum: f64 = occupied.iter().map(|&t| weights.get(t)).sum();

    let filler_total: f64 = filler_spots.iter().map(|s| s.duration_seconds).sum();
    let loop_for_filler = if filler_spots.is_empty() {
        0.0
    } else {
        let filler_available_pct = (100.0 - tier_weight_sum).max(1.0);
        filler_total / (filler_available_pct / 100.0)
    };

    let mut starved_tiers: Vec<Tier> = Tier::ALL
        .into_iter()
        .filter(|t| occupied.contains(t) && weights.get(*t) <= 0.0)
        .collect();
    starved_tiers.sort_by_key(|t| t.rank());

    LoopSolution {
        loop_duration_seconds: base_loop.max(loop_for_filler),
        starved_tiers,
    }
}
