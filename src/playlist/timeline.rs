use crate::playlist::types::{Playlist, ScheduledItem};

/// Formats a second count as "mm:ss". Minutes run past 59 for long loops;
/// seconds are always zero-padded to two digits.
pub fn format_offset(seconds: f64) -> String {
    let total = seconds.floor().max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Walks the ordered items once, stamping each with the accumulated loop
/// position before it plays, and wraps the result into the final playlist.
pub fn annotate(mut items: Vec<ScheduledItem>, loop_duration: f64) -> Playlist {
    let mut elapsed = 0.0;
    for item in &mut items {
        item.start_offset = format_offset(elapsed);
        elapsed += item.duration_seconds;
    }
    Playlist {
        items,
        loop_duration_seconds: loop_duration,
        total_duration_seconds: elapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{SpotKind, Tier};

    fn item(duration: f64) -> ScheduledItem {
        ScheduledItem {
            start_offset: String::new(),
            spot_id: 1,
            name: "spot".to_string(),
            duration_seconds: duration,
            kind: SpotKind::Tier(Tier::M),
        }
    }

    #[test]
    fn offsets_are_a_prefix_sum() {
        let playlist = annotate(vec![item(30.0), item(45.0), item(20.0)], 120.0);
        let offsets: Vec<&str> = playlist
            .items
            .iter()
            .map(|i| i.start_offset.as_str())
            .collect();
        assert_eq!(offsets, ["00:00", "00:30", "01:15"]);
        assert_eq!(playlist.total_duration_seconds, 95.0);
        assert_eq!(playlist.loop_duration_seconds, 120.0);
    }

    #[test]
    fn minutes_run_past_fifty_nine() {
        assert_eq!(format_offset(4500.0), "75:00");
        assert_eq!(format_offset(59.0), "00:59");
        assert_eq!(format_offset(61.5), "01:01");
    }

    #[test]
    fn last_offset_plus_duration_equals_the_total() {
        let playlist = annotate(vec![item(12.0), item(8.0), item(40.0)], 60.0);
        let last = playlist.items.last().unwrap();
        assert_eq!(last.start_offset, "00:20");
        assert_eq!(
            playlist.total_duration_seconds,
            20.0 + last.duration_seconds
        );
    }

    #[test]
    fn empty_sequence_yields_an_empty_playlist() {
        let playlist = annotate(Vec::new(), 0.0);
        assert!(playlist.is_empty());
        assert_eq!(playlist.total_duration_seconds, 0.0);
    }
}
