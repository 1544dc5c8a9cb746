use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use spotloop::display::{print_playlist, write_playlist_to_file};
use spotloop::export::playlist_to_csv;
use spotloop::playlist::{self, OrderingMode};
use spotloop::storage::{Store, STORAGE_FILE};
use spotloop::web;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Check if we should run in web mode
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "web" {
        let port = args.get(2).and_then(|p| p.parse::<u16>().ok()).unwrap_or(8080);
        let password =
            std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string()); // Default password, change this!

        println!("Starting web server on port {}...", port);
        println!("Access the ad manager at http://localhost:{}", port);

        web::start_server(port, password, STORAGE_FILE.into()).await?;
        return Ok(());
    }

    // CLI mode: generate a loop from the stored catalog.
    // Usage: spotloop [interleaved|sponsors-first|sponsors-last] [seed]
    let mode = args
        .get(1)
        .and_then(|a| OrderingMode::from_arg(a))
        .unwrap_or(OrderingMode::SponsorsFirst);
    let seed = args.get(2).and_then(|s| s.parse::<u64>().ok());

    println!("Loading catalog from {}...", STORAGE_FILE);
    let store = Store::load(Path::new(STORAGE_FILE));
    println!(
        "Loaded {} spots ({:?} mode configuration)",
        store.catalog.len(),
        store.config.mode
    );

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let playlist = playlist::generate(&store.catalog, &store.config, mode, &mut rng)?;
    print_playlist(&playlist);

    if !playlist.is_empty() {
        write_playlist_to_file(&playlist, "playlist.txt")?;
        std::fs::write("playlist.csv", playlist_to_csv(&playlist)?)?;
        println!("\nPlaylist saved to:");
        println!("  - playlist.txt");
        println!("  - playlist.csv");
    }

    Ok(())
}
