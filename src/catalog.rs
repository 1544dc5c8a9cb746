use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sponsor package tier. `rank()` gives the playout order used by the
/// block ordering modes: XL spots lead, S spots trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    S,
    M,
    L,
    XL,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::S, Tier::M, Tier::L, Tier::XL];

    pub fn rank(self) -> u8 {
        match self {
            Tier::XL => 1,
            Tier::L => 2,
            Tier::M => 3,
            Tier::S => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::S => "S",
            Tier::M => "M",
            Tier::L => "L",
            Tier::XL => "XL",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a spot is sold as: a sponsor package tier, or club filler content
/// that pads the loop between paid spots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SpotKind {
    Tier(Tier),
    Filler,
}

impl SpotKind {
    pub fn tier(self) -> Option<Tier> {
        match self {
            SpotKind::Tier(t) => Some(t),
            SpotKind::Filler => None,
        }
    }

    pub fn is_filler(self) -> bool {
        matches!(self, SpotKind::Filler)
    }

    /// Sort key for block ordering. Filler sorts after every tier; it never
    /// ends up in the sponsor pool, but the fallback keeps the sort total.
    pub fn rank(self) -> u8 {
        match self {
            SpotKind::Tier(t) => t.rank(),
            SpotKind::Filler => 5,
        }
    }
}

impl fmt::Display for SpotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpotKind::Tier(t) => f.write_str(t.label()),
            SpotKind::Filler => f.write_str("FILLER"),
        }
    }
}

impl From<SpotKind> for String {
    fn from(kind: SpotKind) -> String {
        kind.to_string()
    }
}

impl TryFrom<String> for SpotKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "S" => Ok(SpotKind::Tier(Tier::S)),
            "M" => Ok(SpotKind::Tier(Tier::M)),
            "L" => Ok(SpotKind::Tier(Tier::L)),
            "XL" => Ok(SpotKind::Tier(Tier::XL)),
            "FILLER" => Ok(SpotKind::Filler),
            other => Err(format!("unknown spot kind '{}'", other)),
        }
    }
}

/// A schedulable unit of board content. Immutable once created; removed by
/// explicit deletion only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spot {
    pub id: u32,
    pub name: String,
    pub duration_seconds: f64,
    pub kind: SpotKind,
}

/// Ordered spot collection keyed by id. Insertion order is preserved and is
/// the tie-break order for the stable block sorts and the filler cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub spots: Vec<Spot>,
}

impl Catalog {
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    /// Adds a spot under a fresh random 5-digit id and returns the id.
    /// Re-rolls on collision so no two spots ever share an id.
    pub fn add_spot(
        &mut self,
        name: String,
        duration_seconds: f64,
        kind: SpotKind,
        rng: &mut impl Rng,
    ) -> u32 {
        let mut id = rng.gen_range(10_000..=99_999);
        while self.spots.iter().any(|s| s.id == id) {
            id = rng.gen_range(10_000..=99_999);
        }
        self.spots.push(Spot {
            id,
            name,
            duration_seconds,
            kind,
        });
        id
    }

    /// Removes the spot with the given id. Returns false if no such spot.
    pub fn remove_spot(&mut self, id: u32) -> bool {
        let before = self.spots.len();
        self.spots.retain(|s| s.id != id);
        self.spots.len() != before
    }

    /// Splits the catalog into (sponsor spots, filler spots), both in
    /// catalog order.
    pub fn partition(&self) -> (Vec<&Spot>, Vec<&Spot>) {
        let mut tier_spots = Vec::new();
        let mut filler_spots = Vec::new();
        for spot in &self.spots {
            if spot.kind.is_filler() {
                filler_spots.push(spot);
            } else {
                tier_spots.push(spot);
            }
        }
        (tier_spots, filler_spots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn add_spot_assigns_unique_ids() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut catalog = Catalog::default();
        for i in 0..50 {
            catalog.add_spot(format!("spot {}", i), 10.0, SpotKind::Tier(Tier::M), &mut rng);
        }
        let mut ids: Vec<u32> = catalog.spots.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 50);
        assert!(ids.iter().all(|&id| (10_000..=99_999).contains(&id)));
    }

    #[test]
    fn remove_spot_by_id() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut catalog = Catalog::default();
        let id = catalog.add_spot("gone".into(), 5.0, SpotKind::Filler, &mut rng);
        let keep = catalog.add_spot("kept".into(), 5.0, SpotKind::Filler, &mut rng);
        assert!(catalog.remove_spot(id));
        assert!(!catalog.remove_spot(id));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.spots[0].id, keep);
    }

    #[test]
    fn partition_keeps_catalog_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut catalog = Catalog::default();
        catalog.add_spot("a".into(), 10.0, SpotKind::Tier(Tier::XL), &mut rng);
        catalog.add_spot("b".into(), 10.0, SpotKind::Filler, &mut rng);
        catalog.add_spot("c".into(), 10.0, SpotKind::Tier(Tier::S), &mut rng);
        let (tiers, filler) = catalog.partition();
        let names: Vec<&str> = tiers.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
        assert_eq!(filler.len(), 1);
        assert_eq!(filler[0].name, "b");
    }

    #[test]
    fn spot_kind_round_trips_through_json() {
        let json = serde_json::to_string(&SpotKind::Tier(Tier::XL)).unwrap();
        assert_eq!(json, "\"XL\"");
        let back: SpotKind = serde_json::from_str("\"FILLER\"").unwrap();
        assert_eq!(back, SpotKind::Filler);
        assert!(serde_json::from_str::<SpotKind>("\"XXL\"").is_err());
    }
}
