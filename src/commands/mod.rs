//! Command implementations

pub mod score;
pub mod simple;
pub mod slots;

pub use score::{ScoreResult, score_guess};
pub use simple::{play, run_simple, run_simple_with};
pub use slots::list_slots;
