//! Formatting utilities for the board

use crate::core::{BLANK, Code, Game, MAX_ROUNDS, Score, Turn, WIDTH};

/// Horizontal rule framing the board
pub const BOARD_RULE: &str = "==================+=====";

/// Spread the symbols of a padded code out for the board, e.g. `1  2  3  1  o  o`
#[must_use]
pub fn spaced(padded: &str) -> String {
    let symbols: Vec<String> = padded.chars().map(String::from).collect();
    symbols.join("  ")
}

/// Padded code row, all blanks when `code` is `None`
#[must_use]
pub fn code_cells(code: Option<&Code>) -> String {
    code.map_or_else(
        || spaced(&BLANK.to_string().repeat(WIDTH)),
        |c| spaced(&c.padded()),
    )
}

/// Pin column for a score, e.g. `2 1`
#[must_use]
pub fn pin_cells(score: Score) -> String {
    format!("{} {}", score.exact(), score.partial())
}

/// Header row: the secret once revealed, blanks before that
#[must_use]
pub fn board_header(game: &Game) -> String {
    format!("{} | R W", code_cells(game.revealed_secret()))
}

/// Every board row in display order, most recent round first
///
/// Rounds not yet played come out as `None`, so the board always has
/// `MAX_ROUNDS` rows.
pub fn board_turns(game: &Game) -> impl Iterator<Item = Option<&Turn>> {
    let history = game.history();
    (0..MAX_ROUNDS).rev().map(move |i| history.get(i))
}

/// Plain text for one board row; an unplayed round is blank with no pins
#[must_use]
pub fn board_row(turn: Option<&Turn>) -> String {
    match turn {
        Some(turn) => format!(
            "{} | {}",
            code_cells(Some(&turn.guess)),
            pin_cells(turn.score)
        ),
        None => format!("{} | {}", code_cells(None), pin_cells(Score::default())),
    }
}
