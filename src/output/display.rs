//! Display functions for the text interface
//!
//! Everything writes to a caller-supplied sink so the menu can run against
//! stdout or an in-memory buffer.

use super::formatters::{BOARD_RULE, board_header, board_row, board_turns, code_cells};
use crate::core::{Code, Game, MAX_ROUNDS, Outcome, Score};
use crate::session::SlotEntry;
use colored::Colorize;
use std::io::{self, Write};

/// Section divider under headings
pub fn write_divider<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "─".repeat(74).cyan())
}

/// Heading followed by a divider
pub fn write_heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "\n{}", title.bright_cyan().bold())?;
    write_divider(out)
}

/// Opening story
pub fn write_intro<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{}",
        "You are a member of a secret Society, tasked with cracking
the notorious elvish lock. This lock secures a vault containing all
the school grades, locked away by our rival. To retrieve your grades,
you'll need to break through this lock. Fortunately, the creators of our
rival's lock made an error when building it, so the lock will provide
hints about the code. However, you don't know the passcode length and
only have 10 guesses. Use them wisely!

Will you be able to break this lock before your grades are lost forever?"
            .bright_white()
    )
}

/// Game rules
pub fn write_rules<W: Write>(out: &mut W) -> io::Result<()> {
    write_heading(out, "Rules:")?;
    writeln!(
        out,
        "1. You get {MAX_ROUNDS} guesses to break the lock.

2. Guess the correct code to win the game.

3. Codes can be either 4, 5, or 6 digits in length.

4. Codes can only contain digits 0, 1, 2, 3, 4, and 5.

5. Clues for each guess are given by a number of {} and {} pins.

   a. The number of red pins in the R column indicates the number of digits
      in the correct location.
   b. The number of white pins in the W column indicates the number of
      digits in the code, but in the wrong location.
   c. Each digit of the solution code or guess is only counted once in the
      red or white pins.",
        "red".red().bold(),
        "white".bright_white().bold()
    )
}

/// The board: secret row, then every round, most recent first
pub fn write_board<W: Write>(out: &mut W, game: &Game) -> io::Result<()> {
    let rule = format!("   {BOARD_RULE}").bright_black();
    writeln!(out, "{rule}")?;
    writeln!(out, "    {}", board_header(game).bright_yellow().bold())?;
    writeln!(out, "{rule}")?;

    for turn in board_turns(game) {
        match turn {
            Some(turn) => writeln!(
                out,
                "    {} | {}",
                code_cells(Some(&turn.guess)).bright_white(),
                colored_pins(turn.score)
            )?,
            None => writeln!(out, "    {}", board_row(None).bright_black())?,
        }
    }
    writeln!(out, "{rule}")
}

fn colored_pins(score: Score) -> String {
    format!(
        "{} {}",
        score.exact().to_string().red().bold(),
        score.partial().to_string().bright_white().bold()
    )
}

/// Closing message for a finished game
pub fn write_outcome<W: Write>(out: &mut W, game: &Game) -> io::Result<()> {
    match game.outcome() {
        Outcome::Won => {
            writeln!(out, "{}", "Congratulations, you broke the lock!".green().bold())?;
            writeln!(
                out,
                "{}",
                format!(
                    "The grades are safe! Cracked in {} {}.",
                    game.round(),
                    if game.round() == 1 { "guess" } else { "guesses" }
                )
                .green()
            )
        }
        Outcome::Lost => {
            writeln!(out, "{}", "You hear a machine yell OUT OF TRIES!".red().bold())?;
            writeln!(out, "  ...\nIs that burning you smell?\n  ...")?;
            writeln!(
                out,
                "{}",
                "OH, NO! It looks like our rival has destroyed all the school grades!".red()
            )
        }
        Outcome::InProgress => Ok(()),
    }
}

/// Save slots, numbered from 1
pub fn write_slots<W: Write>(out: &mut W, entries: &[SlotEntry]) -> io::Result<()> {
    write_heading(out, "Files:")?;
    for (i, entry) in entries.iter().enumerate() {
        let label = match entry {
            SlotEntry::Empty => entry.to_string().bright_black(),
            SlotEntry::Occupied { .. } => entry.to_string().bright_white(),
        };
        writeln!(out, "   {}: {label}", i + 1)?;
    }
    Ok(())
}

/// Result of scoring a single guess from the command line
pub fn write_score<W: Write>(out: &mut W, secret: &Code, guess: &Code, score: Score) -> io::Result<()> {
    writeln!(out, "\n   Secret: {}", code_cells(Some(secret)).bright_yellow())?;
    writeln!(out, "   Guess:  {}", code_cells(Some(guess)).bright_white())?;
    writeln!(
        out,
        "   Pins:   {} red, {} white",
        score.exact().to_string().red().bold(),
        score.partial().to_string().bright_white().bold()
    )?;
    if secret == guess {
        writeln!(out, "{}", "   The lock opens!".green().bold())?;
    }
    Ok(())
}
