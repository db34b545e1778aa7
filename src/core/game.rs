//! Game state machine
//!
//! A `Game` owns one puzzle: the secret, the guesses made so far with their
//! scores, and the outcome. Each accepted guess completes one round; the game
//! is won by guessing the secret exactly and lost after ten rounds without
//! doing so.

use super::code::{GuessError, MAX_LEN, MIN_LEN};
use super::{Code, Score, generate};
use chrono::NaiveDateTime;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Rounds available before the game is lost
pub const MAX_ROUNDS: usize = 10;

/// Where a game stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    /// Whether no more guesses are accepted
    #[inline]
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "in progress"),
            Self::Won => write!(f, "won"),
            Self::Lost => write!(f, "lost"),
        }
    }
}

/// One completed round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub guess: Code,
    pub score: Score,
}

/// Details recorded when a game is written to a save slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveMeta {
    pub player: String,
    pub saved_at: NaiveDateTime,
}

/// Errors from driving a game
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("the game is already over")]
    GameAlreadyOver,
    #[error(transparent)]
    InvalidGuess(#[from] GuessError),
}

/// A single puzzle instance
#[derive(Debug, Clone)]
pub struct Game {
    secret: Code,
    history: Vec<Turn>,
    outcome: Outcome,
    meta: Option<SaveMeta>,
}

impl Game {
    /// Start a game with a random 4-6 digit secret
    #[must_use]
    pub fn new() -> Self {
        Self::with_bounds(MIN_LEN, MAX_LEN)
    }

    /// Start a game whose secret length is drawn from `min_len..=max_len`
    ///
    /// Bounds are clamped to 4-6; a reversed range uses `min_len`.
    #[must_use]
    pub fn with_bounds(min_len: usize, max_len: usize) -> Self {
        Self::with_secret(generate(&mut rand::rng(), min_len, max_len))
    }

    /// Start a game with a secret drawn from `rng`
    #[must_use]
    pub fn with_rng<R: rand::Rng>(rng: &mut R) -> Self {
        Self::with_secret(generate(rng, MIN_LEN, MAX_LEN))
    }

    /// Start a game with a known secret
    #[must_use]
    pub fn with_secret(secret: Code) -> Self {
        debug!(len = secret.len(), "new game");
        Self {
            secret,
            history: Vec::with_capacity(MAX_ROUNDS),
            outcome: Outcome::InProgress,
            meta: None,
        }
    }

    /// Rebuild a game from persisted parts
    ///
    /// The outcome is not persisted: a restored game is always in progress,
    /// whatever its history holds. Callers check that the history is
    /// consistent with the secret and leaves at least one round to play.
    pub(crate) fn restore(secret: Code, history: Vec<Turn>, meta: Option<SaveMeta>) -> Self {
        debug_assert!(history.len() < MAX_ROUNDS);
        debug!(round = history.len(), "restored game");
        Self {
            secret,
            history,
            outcome: Outcome::InProgress,
            meta,
        }
    }

    /// Score a validated guess and advance one round
    ///
    /// # Errors
    /// Returns `GameError::GameAlreadyOver` if the game has been won or lost.
    pub fn submit_guess(&mut self, guess: Code) -> Result<Score, GameError> {
        if self.outcome.is_over() {
            return Err(GameError::GameAlreadyOver);
        }

        let score = Score::calculate(&self.secret, &guess);
        self.history.push(Turn { guess, score });

        if guess == self.secret {
            self.outcome = Outcome::Won;
        } else if self.history.len() >= MAX_ROUNDS {
            self.outcome = Outcome::Lost;
        }

        debug!(
            round = self.round(),
            guess = %guess,
            exact = score.exact(),
            partial = score.partial(),
            outcome = %self.outcome,
            "guess scored"
        );
        Ok(score)
    }

    /// Parse a guess string, score it and report the resulting outcome
    ///
    /// # Errors
    /// Returns `GameError::InvalidGuess` for malformed input, leaving the game
    /// untouched, or `GameError::GameAlreadyOver` if the game has ended.
    ///
    /// # Examples
    /// ```
    /// use lockbreaker::core::{Code, Game, Outcome, Score};
    ///
    /// let mut game = Game::with_secret(Code::parse("1231").unwrap());
    /// let (score, outcome) = game.submit("1213").unwrap();
    /// assert_eq!(score, Score::new(2, 2));
    /// assert_eq!(outcome, Outcome::InProgress);
    ///
    /// let (_, outcome) = game.submit("1231").unwrap();
    /// assert_eq!(outcome, Outcome::Won);
    /// ```
    pub fn submit(&mut self, guess: &str) -> Result<(Score, Outcome), GameError> {
        let code = Code::parse(guess)?;
        let score = self.submit_guess(code)?;
        Ok((score, self.outcome))
    }

    #[inline]
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[inline]
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.outcome.is_over()
    }

    /// Completed rounds, oldest first
    #[inline]
    #[must_use]
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Number of completed rounds (0-10)
    #[inline]
    #[must_use]
    pub fn round(&self) -> usize {
        self.history.len()
    }

    #[inline]
    #[must_use]
    pub fn rounds_left(&self) -> usize {
        MAX_ROUNDS.saturating_sub(self.history.len())
    }

    /// The secret, regardless of outcome
    #[inline]
    #[must_use]
    pub const fn secret(&self) -> &Code {
        &self.secret
    }

    /// The secret once the game is over, hidden while it is in progress
    #[must_use]
    pub const fn revealed_secret(&self) -> Option<&Code> {
        if self.outcome.is_over() {
            Some(&self.secret)
        } else {
            None
        }
    }

    /// Save details, present only for games written to or read from a slot
    #[inline]
    #[must_use]
    pub const fn meta(&self) -> Option<&SaveMeta> {
        self.meta.as_ref()
    }

    pub(crate) fn set_meta(&mut self, meta: SaveMeta) {
        self.meta = Some(meta);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
