use csv::WriterBuilder;
use serde::Serialize;
use std::collections::HashMap;

use crate::catalog::SpotKind;
use crate::error::Result;
use crate::playlist::Playlist;

/// Renders the playlist as a semicolon-separated CSV table, the layout the
/// board operators load into their spreadsheet.
pub fn playlist_to_csv(playlist: &Playlist) -> Result<String> {
    let mut wtr = WriterBuilder::new().delimiter(b';').from_writer(Vec::new());
    wtr.write_record(["start", "name", "duration_s", "type", "id"])?;
    for item in &playlist.items {
        wtr.write_record([
            item.start_offset.as_str(),
            item.name.as_str(),
            &item.duration_seconds.to_string(),
            &item.kind.to_string(),
            &item.spot_id.to_string(),
        ])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| std::io::Error::new(e.error().kind(), e.to_string()))?;
    // The writer only ever receives UTF-8 input.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Airtime of one catalog entry within the generated loop: all plays of the
/// same spot name and kind summed up. Feeds the distribution chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AirtimeSlice {
    pub name: String,
    pub kind: SpotKind,
    pub total_seconds: f64,
    pub share_pct: f64,
}

/// Groups the playlist by (name, kind) and sums durations. Slices are
/// sorted by airtime, largest first, name as tie-break.
pub fn aggregate_airtime(playlist: &Playlist) -> Vec<AirtimeSlice> {
    let mut totals: HashMap<(String, SpotKind), f64> = HashMap::new();
    for item in &playlist.items {
        *totals
            .entry((item.name.clone(), item.kind))
            .or_insert(0.0) += item.duration_seconds;
    }
    let grand_total: f64 = totals.values().sum();
    let mut slices: Vec<AirtimeSlice> = totals
        .into_iter()
        .map(|((name, kind), total_seconds)| AirtimeSlice {
            name,
            kind,
            total_seconds,
            share_pct: if grand_total > 0.0 {
                total_seconds / grand_total * 100.0
            } else {
                0.0
            },
        })
        .collect();
    slices.sort_by(|a, b| {
        b.total_seconds
            .partial_cmp(&a.total_seconds)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    slices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Tier;
    use crate::playlist::ScheduledItem;

    fn item(name: &str, duration: f64, kind: SpotKind, offset: &str) -> ScheduledItem {
        ScheduledItem {
            start_offset: offset.to_string(),
            spot_id: 12345,
            name: name.to_string(),
            duration_seconds: duration,
            kind,
        }
    }

    fn sample_playlist() -> Playlist {
        Playlist {
            items: vec![
                item("alpha", 20.0, SpotKind::Tier(Tier::XL), "00:00"),
                item("club reel", 30.0, SpotKind::Filler, "00:20"),
                item("alpha", 20.0, SpotKind::Tier(Tier::XL), "00:50"),
                item("beta", 10.0, SpotKind::Tier(Tier::S), "01:10"),
            ],
            loop_duration_seconds: 100.0,
            total_duration_seconds: 80.0,
        }
    }

    #[test]
    fn csv_uses_semicolons_and_one_row_per_item() {
        let csv = playlist_to_csv(&sample_playlist()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "start;name;duration_s;type;id");
        assert_eq!(lines[1], "00:00;alpha;20;XL;12345");
        assert_eq!(lines[2], "00:20;club reel;30;FILLER;12345");
    }

    #[test]
    fn airtime_groups_repeated_plays() {
        let slices = aggregate_airtime(&sample_playlist());
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].name, "alpha");
        assert_eq!(slices[0].total_seconds, 40.0);
        assert!((slices[0].share_pct - 50.0).abs() < 1e-9);
        assert_eq!(slices[1].name, "club reel");
        assert_eq!(slices[2].name, "beta");
    }

    #[test]
    fn empty_playlist_aggregates_to_nothing() {
        assert!(aggregate_airtime(&Playlist::default()).is_empty());
    }
}
