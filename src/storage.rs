use std::path::Path;

use chrono::Utc;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::config::TierWeightConfig;
use crate::error::Result;

/// Default on-disk location for the catalog and weight configuration.
pub const STORAGE_FILE: &str = "data_storage.json";

/// Everything the app persists between sessions: the spot catalog and the
/// tier weight configuration, stored together in one JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    /// RFC 3339 timestamp of the last save.
    #[serde(default)]
    pub saved_at: Option<String>,
    #[serde(default)]
    pub catalog: Catalog,
    #[serde(default = "TierWeightConfig::default")]
    pub config: TierWeightConfig,
}

impl Default for Store {
    fn default() -> Self {
        Store {
            saved_at: None,
            catalog: Catalog::default(),
            config: TierWeightConfig::default(),
        }
    }
}

impl Store {
    /// Loads the store from disk. A missing or unreadable file degrades to
    /// the defaults so a fresh or damaged installation still starts.
    pub fn load(path: &Path) -> Store {
        if !path.exists() {
            return Store::default();
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(store) => store,
                Err(e) => {
                    warn!("storage file {} is corrupt ({}), starting empty", path.display(), e);
                    Store::default()
                }
            },
            Err(e) => {
                warn!("cannot read {} ({}), starting empty", path.display(), e);
                Store::default()
            }
        }
    }

    /// Writes the store to disk as pretty-printed JSON, stamping the save
    /// time.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.saved_at = Some(Utc::now().to_rfc3339());
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{SpotKind, Tier};
    use crate::config::WeightMode;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::load(&dir.path().join("nope.json"));
        assert!(store.catalog.is_empty());
        assert_eq!(store.config, TierWeightConfig::default());
        assert!(store.saved_at.is_none());
    }

    #[test]
    fn corrupt_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = Store::load(&path);
        assert!(store.catalog.is_empty());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let mut rng = StdRng::seed_from_u64(1);

        let mut store = Store::default();
        store
            .catalog
            .add_spot("main sponsor".into(), 25.0, SpotKind::Tier(Tier::XL), &mut rng);
        store
            .catalog
            .add_spot("club reel".into(), 40.0, SpotKind::Filler, &mut rng);
        store.config.mode = WeightMode::AbsoluteMinutes;
        store.config.minutes.xl = 55.0;
        store.save(&path).unwrap();

        let loaded = Store::load(&path);
        assert!(loaded.saved_at.is_some());
        assert_eq!(loaded.catalog.len(), 2);
        assert_eq!(loaded.catalog.spots[0].name, "main sponsor");
        assert_eq!(loaded.catalog.spots[1].kind, SpotKind::Filler);
        assert_eq!(loaded.config.mode, WeightMode::AbsoluteMinutes);
        assert_eq!(loaded.config.minutes.xl, 55.0);
    }
}
