use serde::{Deserialize, Serialize};

use crate::catalog::{Spot, SpotKind};

/// How the materialized instances are arranged into the final loop order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingMode {
    /// Shuffled sponsor pool with one filler instance slotted after each
    /// sponsor item until filler runs out.
    Interleaved,
    /// Sponsor block (XL first) followed by all filler.
    SponsorsFirst,
    /// All filler followed by the sponsor block (XL first).
    SponsorsLast,
}

impl OrderingMode {
    /// Parses the CLI spelling of a mode.
    pub fn from_arg(arg: &str) -> Option<OrderingMode> {
        match arg {
            "interleaved" => Some(OrderingMode::Interleaved),
            "sponsors-first" => Some(OrderingMode::SponsorsFirst),
            "sponsors-last" => Some(OrderingMode::SponsorsLast),
            _ => None,
        }
    }
}

/// One playout instance of a spot. The same spot id appears once per
/// repetition; `start_offset` is filled in by the timeline annotator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledItem {
    /// Cumulative start position in the loop, "mm:ss".
    pub start_offset: String,
    pub spot_id: u32,
    pub name: String,
    pub duration_seconds: f64,
    pub kind: SpotKind,
}

impl ScheduledItem {
    pub fn from_spot(spot: &Spot) -> ScheduledItem {
        ScheduledItem {
            start_offset: String::new(),
            spot_id: spot.id,
            name: spot.name.clone(),
            duration_seconds: spot.duration_seconds,
            kind: spot.kind,
        }
    }
}

/// The generated loop: ordered items plus the solved loop target and the
/// actual summed duration. Read-only once produced; the next generation run
/// replaces it wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Playlist {
    pub items: Vec<ScheduledItem>,
    /// Loop length the solver derived from the tier weights.
    pub loop_duration_seconds: f64,
    /// Sum of all scheduled item durations.
    pub total_duration_seconds: f64,
}

impl Playlist {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
