//! Named save slots on disk
//!
//! The save directory holds an index file with one line per slot, either
//! `empty` or a label naming the player and save time, and one record file
//! per occupied slot. Slots are numbered from 1.

use super::{SessionError, decode, encode};
use crate::core::{Game, SaveMeta};
use chrono::NaiveDateTime;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const INDEX_FILE: &str = "slots.txt";
const EMPTY_LABEL: &str = "empty";

/// Contents of one save slot as shown in the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotEntry {
    Empty,
    Occupied { label: String },
}

impl SlotEntry {
    fn from_line(line: &str) -> Self {
        match line.trim_end() {
            EMPTY_LABEL | "" => Self::Empty,
            label => Self::Occupied {
                label: label.to_string(),
            },
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for SlotEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "{EMPTY_LABEL}"),
            Self::Occupied { label } => write!(f, "{label}"),
        }
    }
}

/// Check a player name: non-empty, letters, digits and spaces only
///
/// Returns the name with surrounding whitespace removed.
///
/// # Errors
/// Returns `SessionError::InvalidName` otherwise.
pub fn validate_name(name: &str) -> Result<String, SessionError> {
    let trimmed = name.trim();
    let has_content = trimmed.chars().any(char::is_alphanumeric);
    let allowed = trimmed.chars().all(|c| c.is_alphanumeric() || c == ' ');

    if has_content && allowed {
        Ok(trimmed.to_string())
    } else {
        Err(SessionError::InvalidName(name.to_string()))
    }
}

/// Label written to the index for a saved game, e.g. `Ada - Time: 2024-11-05T14:03:22`
fn slot_label(meta: &SaveMeta) -> String {
    format!(
        "{} - Time: {}",
        meta.player,
        meta.saved_at.format("%Y-%m-%dT%H:%M:%S")
    )
}

/// Save slots rooted at a directory
#[derive(Debug, Clone)]
pub struct SlotStore {
    dir: PathBuf,
    slots: usize,
}

impl SlotStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, slots: usize) -> Self {
        Self {
            dir: dir.into(),
            slots,
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of slots
    #[must_use]
    pub const fn slots(&self) -> usize {
        self.slots
    }

    fn index_path(&self) -> PathBuf {
        self.dir.join(INDEX_FILE)
    }

    fn record_path(&self, slot: usize) -> PathBuf {
        self.dir.join(format!("slot-{slot}.json"))
    }

    fn check_slot(&self, slot: usize) -> Result<(), SessionError> {
        if (1..=self.slots).contains(&slot) {
            Ok(())
        } else {
            Err(SessionError::SlotOutOfRange {
                slot,
                slots: self.slots,
            })
        }
    }

    /// Read the slot index
    ///
    /// A missing index is created with every slot empty. An index with the
    /// wrong number of lines is reported as all-empty and rewritten on the
    /// next save.
    ///
    /// # Errors
    /// Returns `SessionError::Io` if the index cannot be read or created.
    pub fn list(&self) -> Result<Vec<SlotEntry>, SessionError> {
        let path = self.index_path();

        if !path.exists() {
            debug!(path = %path.display(), "creating slot index");
            let empty = vec![SlotEntry::Empty; self.slots];
            self.write_index(&empty)?;
            return Ok(empty);
        }

        let contents = fs::read_to_string(&path).map_err(|e| SessionError::io(&path, e))?;
        let lines: Vec<&str> = contents.lines().collect();

        if lines.len() != self.slots {
            warn!(
                path = %path.display(),
                lines = lines.len(),
                expected = self.slots,
                "slot index has the wrong length; treating every slot as empty"
            );
            return Ok(vec![SlotEntry::Empty; self.slots]);
        }

        Ok(lines.into_iter().map(SlotEntry::from_line).collect())
    }

    /// Load the game saved in `slot`
    ///
    /// The returned game keeps its player name and save time, and is in
    /// progress regardless of the history it was saved with.
    ///
    /// # Errors
    /// Returns `SlotOutOfRange` or `EmptySlot` for a bad selection, `Io` if the
    /// record cannot be read, and `CorruptRecord` if it fails to decode.
    pub fn load(&self, slot: usize) -> Result<Game, SessionError> {
        self.check_slot(slot)?;

        let entries = self.list()?;
        if entries[slot - 1].is_empty() {
            return Err(SessionError::EmptySlot(slot));
        }

        let path = self.record_path(slot);
        let text = fs::read_to_string(&path).map_err(|e| SessionError::io(&path, e))?;
        let game = decode(&text)?;

        info!(slot, round = game.round(), "loaded game");
        Ok(game)
    }

    /// Save `game` into `slot` under `player`, overwriting what was there
    ///
    /// The player name and save time are attached to the game.
    ///
    /// # Errors
    /// Returns `SlotOutOfRange`, `InvalidName`, `GameOver` for a game that has
    /// already been won or lost, or `Io` if either file cannot be written.
    pub fn save(
        &self,
        slot: usize,
        game: &mut Game,
        player: &str,
        saved_at: NaiveDateTime,
    ) -> Result<(), SessionError> {
        self.check_slot(slot)?;
        let player = validate_name(player)?;
        if game.is_over() {
            return Err(SessionError::GameOver);
        }

        let meta = SaveMeta { player, saved_at };
        let label = slot_label(&meta);
        game.set_meta(meta);

        write_atomic(&self.record_path(slot), &encode(game)?)?;

        let mut entries = self.list()?;
        entries[slot - 1] = SlotEntry::Occupied { label };
        self.write_index(&entries)?;

        info!(slot, round = game.round(), "saved game");
        Ok(())
    }

    fn write_index(&self, entries: &[SlotEntry]) -> Result<(), SessionError> {
        let mut buf = String::new();
        for entry in entries {
            buf.push_str(&entry.to_string());
            buf.push('\n');
        }
        write_atomic(&self.index_path(), &buf)
    }
}

/// Write through a temp file and rename over the target
fn write_atomic(path: &Path, contents: &str) -> Result<(), SessionError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SessionError::io(parent, e))?;
    }
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, contents).map_err(|e| SessionError::io(&tmp_path, e))?;
    fs::rename(&tmp_path, path).map_err(|e| SessionError::io(path, e))?;
    Ok(())
}
