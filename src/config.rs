//! Game configuration stored in `lockbreaker.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::session::SlotStore;

/// Default config file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "lockbreaker.toml";

/// Game configuration (TOML).
///
/// Missing fields fall back to defaults, so an empty file is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Directory holding the slot index and saved games.
    pub save_dir: PathBuf,

    /// Number of save slots (1-9).
    pub slots: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from(".lockbreaker"),
            slots: 3,
        }
    }
}

impl Config {
    /// Check that values are usable
    ///
    /// # Errors
    /// Returns an error if `slots` is outside 1-9 or `save_dir` is empty.
    pub fn validate(&self) -> Result<()> {
        if !(1..=9).contains(&self.slots) {
            bail!("slots must be between 1 and 9, got {}", self.slots);
        }
        if self.save_dir.as_os_str().is_empty() {
            bail!("save_dir must not be empty");
        }
        Ok(())
    }

    /// Slot store described by this config
    #[must_use]
    pub fn slot_store(&self) -> SlotStore {
        SlotStore::new(&self.save_dir, self.slots)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `Config::default()`.
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid TOML, or holds
/// values rejected by [`Config::validate`].
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        let cfg = Config::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: Config =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    debug!(save_dir = %cfg.save_dir.display(), slots = cfg.slots, "config loaded");
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("lockbreaker.toml");
        fs::write(&path, "slots = 5\n").expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.slots, 5);
        assert_eq!(cfg.save_dir, Config::default().save_dir);
    }

    #[test]
    fn rejects_slot_count_out_of_range() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("lockbreaker.toml");
        fs::write(&path, "slots = 0\n").expect("write");
        assert!(load_config(&path).is_err());

        fs::write(&path, "slots = 10\n").expect("write");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn rejects_unparsable_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("lockbreaker.toml");
        fs::write(&path, "slots = \"three\"\n").expect("write");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn slot_store_uses_config() {
        let cfg = Config {
            save_dir: PathBuf::from("saves"),
            slots: 4,
        };
        let store = cfg.slot_store();
        assert_eq!(store.dir(), Path::new("saves"));
        assert_eq!(store.slots(), 4);
    }
}
