//! Saved games
//!
//! A game is persisted as a versioned JSON record ([`record`]) inside one of
//! a fixed number of named save slots ([`slots`]).

pub mod record;
pub mod slots;

pub use record::{RECORD_VERSION, SessionRecord, TurnRecord, decode, encode};
pub use slots::{SlotEntry, SlotStore, validate_name};

use chrono::{Local, NaiveDateTime, SubsecRound};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading or writing saved games
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("corrupt save record: {0}")]
    CorruptRecord(String),

    #[error("failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode save record")]
    Encode(#[source] serde_json::Error),

    #[error("slot {slot} does not exist; choose 1 to {slots}")]
    SlotOutOfRange { slot: usize, slots: usize },

    #[error("slot {0} is empty")]
    EmptySlot(usize),

    #[error("\"{0}\" is an invalid name; use letters, numbers and spaces only")]
    InvalidName(String),

    #[error("a finished game cannot be saved")]
    GameOver,
}

impl SessionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Local wall-clock time at second precision, as stamped on saves
#[must_use]
pub fn timestamp() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}
