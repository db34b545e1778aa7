//! Save slot listing

use crate::output::write_slots;
use crate::session::{SlotEntry, SlotStore};
use anyhow::{Context, Result};
use std::io::Write;

/// Print every save slot with its label
///
/// A missing index is created on first use, so a fresh save directory lists
/// every slot as empty.
///
/// # Errors
///
/// Returns an error if the slot index cannot be read or created, or writing
/// to `out` fails.
pub fn list_slots<W: Write>(out: &mut W, store: &SlotStore) -> Result<Vec<SlotEntry>> {
    let entries = store
        .list()
        .with_context(|| format!("read save slots in {}", store.dir().display()))?;
    write_slots(out, &entries)?;
    Ok(entries)
}
