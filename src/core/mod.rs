//! Core game logic
//!
//! Codes, feedback scoring, secret generation and the round state machine.
//! Nothing here performs I/O.

mod code;
mod game;
mod generator;
mod score;

pub use code::{BLANK, Code, GuessError, MAX_DIGIT, MAX_LEN, MIN_LEN, WIDTH};
pub use game::{Game, GameError, MAX_ROUNDS, Outcome, SaveMeta, Turn};
pub use generator::generate;
pub use score::Score;
