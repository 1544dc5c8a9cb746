use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::Spot;
use crate::error::{Error, Result};
use crate::playlist::types::{OrderingMode, ScheduledItem};
use crate::playlist::weights::NormalizedWeights;

/// Expands every spot into its repeated playout instances and arranges them
/// according to the ordering mode. Offsets are not assigned here; the
/// timeline annotator does that on the final order.
///
/// Repeat counts use ceiling division so a tier's delivered airtime meets or
/// exceeds its share, never undercuts it. Filler cycles through the filler
/// list in catalog order until the loop is covered, with at least one full
/// pass so every club spot airs even on short loops.
pub fn materialize(
    loop_duration: f64,
    tier_spots: &[&Spot],
    filler_spots: &[&Spot],
    weights: &NormalizedWeights,
    mode: OrderingMode,
    rng: &mut impl Rng,
) -> Result<Vec<ScheduledItem>> {
    for spot in tier_spots.iter().chain(filler_spots.iter()) {
        if spot.duration_seconds <= 0.0 {
            return Err(Error::InvalidSpotDuration {
                id: spot.id,
                name: spot.name.clone(),
                duration_seconds: spot.duration_seconds,
            });
        }
    }

    // Sponsor pool: each spot repeated often enough to fill its tier share.
    let mut pool: Vec<ScheduledItem> = Vec::new();
    for spot in tier_spots {
        let weight = spot.kind.tier().map(|t| weights.get(t)).unwrap_or(0.0);
        let repeat_count =
            ((loop_duration * (weight / 100.0)) / spot.duration_seconds).ceil() as usize;
        for _ in 0..repeat_count {
            pool.push(ScheduledItem::from_spot(spot));
        }
    }

    // Filler instances: wrap around the filler list until the combined
    // airtime reaches the loop target and the list has been played through
    // at least once.
    let pool_duration: f64 = pool.iter().map(|i| i.duration_seconds).sum();
    let mut filler_items: Vec<ScheduledItem> = Vec::new();
    if !filler_spots.is_empty() {
        let mut filler_duration = 0.0;
        let mut counter = 0usize;
        while pool_duration + filler_duration < loop_duration || counter < filler_spots.len() {
            let spot = filler_spots[counter % filler_spots.len()];
            filler_items.push(ScheduledItem::from_spot(spot));
            filler_duration += spot.duration_seconds;
            counter += 1;
        }
    }

    let ordered = match mode {
        OrderingMode::Interleaved => {
            pool.shuffle(rng);
            let mut out = Vec::with_capacity(pool.len() + filler_items.len());
            let mut filler_iter = filler_items.into_iter();
            for item in pool {
                out.push(item);
                if let Some(filler) = filler_iter.next() {
                    out.push(filler);
                }
            }
            out.extend(filler_iter);
            out
        }
        OrderingMode::SponsorsFirst => {
            pool.sort_by_key(|item| item.kind.rank());
            pool.extend(filler_items);
            pool
        }
        OrderingMode::SponsorsLast => {
            pool.sort_by_key(|item| item.kind.rank());
            filler_items.extend(pool);
            filler_items
        }
    };
    Ok(ordered)
}
