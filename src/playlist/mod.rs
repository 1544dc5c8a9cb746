pub mod materialize;
pub mod solver;
pub mod timeline;
pub mod types;
pub mod weights;

pub use solver::{solve, LoopSolution};
pub use types::{OrderingMode, Playlist, ScheduledItem};
pub use weights::{normalize, NormalizedWeights};

use log::warn;
use rand::Rng;

use crate::catalog::Catalog;
use crate::config::TierWeightConfig;
use crate::error::Result;

/// Runs the full pipeline on a catalog/config snapshot: weight
/// normalization, loop duration solving, materialization, timeline
/// annotation. Pure apart from the injected random source, so a fixed seed
/// reproduces the exact sequence.
///
/// An empty catalog yields an empty playlist, not an error.
pub fn generate(
    catalog: &Catalog,
    config: &TierWeightConfig,
    mode: OrderingMode,
    rng: &mut impl Rng,
) -> Result<Playlist> {
    config.validate()?;
    if catalog.is_empty() {
        return Ok(Playlist::default());
    }

    let (tier_spots, filler_spots) = catalog.partition();
    let weights = normalize(config.active_values(), config.mode, config.total_event_minutes);
    let solution = solve(&tier_spots, &filler_spots, &weights);
    for tier in &solution.starved_tiers {
        warn!(
            "tier {} has spots but no configured weight; loop duration is pinned at the sentinel bound",
            tier
        );
    }

    let items = materialize::materialize(
        solution.loop_duration_seconds,
        &tier_spots,
        &filler_spots,
        &weights,
        mode,
        rng,
    )?;
    Ok(timeline::annotate(items, solution.loop_duration_seconds))
}
