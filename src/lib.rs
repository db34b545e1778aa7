//! Lockbreaker
//!
//! A Mastermind-style code-breaking game: find a secret of 4-6 digits (0-5)
//! in ten guesses, guided by red and white pins, with named save slots.
//!
//! # Quick Start
//!
//! ```rust
//! use lockbreaker::core::{Code, Game, Outcome, Score};
//!
//! let mut game = Game::with_secret(Code::parse("1231").unwrap());
//!
//! let (score, outcome) = game.submit("1213").unwrap();
//! assert_eq!(score, Score::new(2, 2));
//! assert_eq!(outcome, Outcome::InProgress);
//! ```

// Core domain types
pub mod core;

// Saved games
pub mod session;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;

// Configuration file
pub mod config;

// Diagnostic tracing
pub mod logging;
