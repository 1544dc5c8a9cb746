use std::fs::File;
use std::io::Write;

use crate::error::Result;
use crate::playlist::Playlist;

/// Formats a loop length for humans, e.g. "8m 20s".
pub fn format_loop_duration(seconds: f64) -> String {
    let total = seconds.floor().max(0.0) as u64;
    format!("{}m {}s", total / 60, total % 60)
}

/// Prints the generated loop to stdout in a readable table.
pub fn print_playlist(playlist: &Playlist) {
    println!(
        "\n=== Loop Playlist (optimized loop duration: {}) ===",
        format_loop_duration(playlist.loop_duration_seconds)
    );
    if playlist.is_empty() {
        println!("(no spots in catalog, nothing to schedule)");
        return;
    }
    for item in &playlist.items {
        println!(
            "  {}  {:<30} {:>6}s  {:<6} (id {})",
            item.start_offset, item.name, item.duration_seconds, item.kind, item.spot_id
        );
    }
    println!(
        "\nSpots: {} | Total duration: {}s",
        playlist.len(),
        playlist.total_duration_seconds
    );
}

/// Writes the loop to a plain-text file, one item per line: offset, name,
/// duration, kind.
pub fn write_playlist_to_file(playlist: &Playlist, filename: &str) -> Result<()> {
    let mut file = File::create(filename)?;
    writeln!(
        file,
        "** Loop Playlist ({}) **",
        format_loop_duration(playlist.loop_duration_seconds)
    )?;
    for item in &playlist.items {
        writeln!(
            file,
            "{} {} ({}s, {})",
            item.start_offset, item.name, item.duration_seconds, item.kind
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_duration_formatting() {
        assert_eq!(format_loop_duration(500.0), "8m 20s");
        assert_eq!(format_loop_duration(59.9), "0m 59s");
        assert_eq!(format_loop_duration(0.0), "0m 0s");
    }
}
