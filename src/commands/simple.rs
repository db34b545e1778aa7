//! Simple interactive CLI mode
//!
//! Text menu without the TUI: rules, new game, load game, quit. During a
//! game the prompt accepts a guess, `q` to quit or `s` to save and quit.

use crate::core::{Game, GameError};
use crate::output::{write_board, write_heading, write_intro, write_outcome, write_rules, write_slots};
use crate::session::{SessionError, SlotStore, timestamp};
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Run the simple interactive CLI mode on stdin and stdout
///
/// # Errors
///
/// Returns an error if reading input fails or a save slot cannot be accessed.
pub fn run_simple(store: &SlotStore) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_simple_with(&mut stdin.lock(), &mut stdout.lock(), store)
}

/// Run the menu loop reading from `input` and writing to `out`
///
/// End of input is treated as quitting.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails, or a save slot
/// cannot be accessed.
pub fn run_simple_with<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    store: &SlotStore,
) -> Result<()> {
    write_intro(out)?;

    loop {
        write_heading(out, "Menu:")?;
        writeln!(out, "   1: Rules\n   2: New Game\n   3: Load Game\n   4: Quit")?;

        let Some(choice) = prompt(input, out, "Choice")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => write_rules(out)?,
            "2" => {
                let mut game = Game::new();
                write_heading(out, "New Game:")?;
                play(input, out, store, &mut game)?;
            }
            "3" => {
                if let Some(mut game) = load(input, out, store)? {
                    write_heading(out, "Resume Game:")?;
                    play(input, out, store, &mut game)?;
                }
            }
            "4" => {
                writeln!(out, "Goodbye")?;
                return Ok(());
            }
            _ => writeln!(out, "Please enter 1, 2, 3, or 4.")?,
        }
    }
}

/// Play `game` until it ends, the player quits, or the player saves
///
/// # Errors
///
/// Returns an error if reading input or writing output fails, or a save slot
/// cannot be accessed.
pub fn play<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    store: &SlotStore,
    game: &mut Game,
) -> Result<()> {
    write_board(out, game)?;

    loop {
        let Some(line) = prompt(input, out, "What is your guess (q to quit, s to save and quit)")?
        else {
            return Ok(());
        };

        match line.to_lowercase().as_str() {
            "q" => {
                writeln!(out, "Ending Game.")?;
                return Ok(());
            }
            "s" => {
                if save(input, out, store, game)? {
                    writeln!(out, "Ending Game.")?;
                    return Ok(());
                }
                write_board(out, game)?;
            }
            guess => match game.submit(guess) {
                Ok((_, outcome)) => {
                    write_board(out, game)?;
                    if outcome.is_over() {
                        write_outcome(out, game)?;
                        return Ok(());
                    }
                }
                Err(GameError::InvalidGuess(e)) => writeln!(out, "{}", e.to_string().red())?,
                Err(e @ GameError::GameAlreadyOver) => return Err(e.into()),
            },
        }
    }
}

/// Ask for a slot and a name, then save. Returns whether the game was saved.
fn save<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    store: &SlotStore,
    game: &mut Game,
) -> Result<bool> {
    let entries = store.list().context("read save slots")?;
    write_slots(out, &entries)?;

    let question = format!(
        "What save would you like to overwrite (1-{}, or c to cancel)",
        entries.len()
    );
    let Some(slot) = choose_slot(input, out, &question, entries.len())? else {
        writeln!(out, "cancelled")?;
        return Ok(false);
    };

    loop {
        let Some(name) = prompt(input, out, "What is your name (no special characters)")? else {
            return Ok(false);
        };

        match store.save(slot, game, &name, timestamp()) {
            Ok(()) => {
                let player = game.meta().map_or(name.as_str(), |m| m.player.as_str());
                writeln!(out, "Game saved in slot {slot} as {player}.")?;
                return Ok(true);
            }
            Err(SessionError::InvalidName(_)) => writeln!(out, "That is an invalid name.")?,
            Err(e) => return Err(e).with_context(|| format!("save slot {slot}")),
        }
    }
}

/// Ask for a slot and load its game. Returns `None` if cancelled or unloadable.
fn load<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    store: &SlotStore,
) -> Result<Option<Game>> {
    let entries = store.list().context("read save slots")?;
    write_slots(out, &entries)?;

    let question = format!(
        "What save would you like to load (1-{}, or c to cancel)",
        entries.len()
    );

    loop {
        let Some(slot) = choose_slot(input, out, &question, entries.len())? else {
            writeln!(out, "cancelled")?;
            return Ok(None);
        };

        if entries[slot - 1].is_empty() {
            writeln!(out, "That file is empty!")?;
            continue;
        }

        match store.load(slot) {
            Ok(game) => return Ok(Some(game)),
            Err(e) => {
                debug!(slot, error = %e, "load failed");
                writeln!(out, "{}", format!("Could not load slot {slot}: {e}").red())?;
                return Ok(None);
            }
        }
    }
}

/// Read a slot number in `1..=slots`; `None` on `c` or end of input
fn choose_slot<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
    slots: usize,
) -> Result<Option<usize>> {
    loop {
        let Some(answer) = prompt(input, out, question)? else {
            return Ok(None);
        };
        if answer.eq_ignore_ascii_case("c") {
            return Ok(None);
        }
        match answer.parse::<usize>() {
            Ok(slot) if (1..=slots).contains(&slot) => return Ok(Some(slot)),
            _ => writeln!(out, "That is an invalid selection.")?,
        }
    }
}

/// Prompt and read one trimmed line; `None` at end of input
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> Result<Option<String>> {
    write!(out, "{text}: ")?;
    out.flush().context("flush output")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("read input")?;
    if read == 0 {
        writeln!(out)?;
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Code, Outcome};
    use crate::session::SlotEntry;
    use std::io::Cursor;

    fn store() -> (tempfile::TempDir, SlotStore) {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = SlotStore::new(temp.path(), 3);
        (temp, store)
    }

    fn game(secret: &str) -> Game {
        Game::with_secret(Code::parse(secret).unwrap())
    }

    /// Play `game` on scripted input, returning everything written
    fn play_script(store: &SlotStore, game: &mut Game, script: &str) -> String {
        let mut out = Vec::new();
        play(&mut Cursor::new(script), &mut out, store, game).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn menu_script(store: &SlotStore, script: &str) -> String {
        let mut out = Vec::new();
        run_simple_with(&mut Cursor::new(script), &mut out, store).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn play_until_won() {
        let (_temp, store) = store();
        let mut g = game("1231");

        let out = play_script(&store, &mut g, "0000\n1213\n1231\n");

        assert_eq!(g.outcome(), Outcome::Won);
        assert_eq!(g.round(), 3);
        assert!(out.contains("Cracked in 3 guesses."));
    }

    #[test]
    fn invalid_guesses_do_not_use_rounds() {
        let (_temp, store) = store();
        let mut g = game("1231");

        let out = play_script(&store, &mut g, "12a4\n123\n1239\n0000\nq\n");

        assert_eq!(g.round(), 1);
        assert_eq!(g.outcome(), Outcome::InProgress);
        assert!(out.contains("Your guess was \"12a4\". It must be only numbers!"));
        assert!(out.contains("Your guess was \"123\". This is too short."));
        assert!(out.contains("Your guess was \"1239\". It must be only numbers 0 through 5."));
        assert!(out.contains("Ending Game."));
    }

    #[test]
    fn play_until_lost() {
        let (_temp, store) = store();
        let mut g = game("1231");

        let out = play_script(&store, &mut g, &"0000\n".repeat(12));

        assert_eq!(g.outcome(), Outcome::Lost);
        assert_eq!(g.round(), 10);
        assert!(out.contains("OUT OF TRIES!"));
    }

    #[test]
    fn save_and_quit_writes_slot() {
        let (_temp, store) = store();
        let mut g = game("1231");

        let out = play_script(&store, &mut g, "1213\n0000\ns\n7\n2\nAda!\nAda\n");

        assert!(out.contains("That is an invalid selection."));
        assert!(out.contains("That is an invalid name."));
        assert!(out.contains("Game saved in slot 2 as Ada."));
        let loaded = store.load(2).unwrap();
        assert_eq!(loaded.round(), 2);
        assert_eq!(loaded.meta().unwrap().player, "Ada");
    }

    #[test]
    fn cancelled_save_keeps_playing() {
        let (_temp, store) = store();
        let mut g = game("1231");

        let out = play_script(&store, &mut g, "s\nc\n1231\n");

        assert!(out.contains("cancelled"));
        assert_eq!(g.outcome(), Outcome::Won);
        assert!(store.list().unwrap().iter().all(SlotEntry::is_empty));
    }

    #[test]
    fn menu_loads_and_resumes_saved_game() {
        let (_temp, store) = store();
        let mut saved = game("1231");
        saved.submit("1213").unwrap();
        store.save(1, &mut saved, "Ada", timestamp()).unwrap();

        // Pick the empty slot 2 first, then slot 1, win, then quit from the menu
        let out = menu_script(&store, "3\n2\n1\n1231\n4\n");

        assert!(out.contains("That file is empty!"));
        assert!(out.contains("Resume Game:"));
        let resumed = out.find("1  2  1  3  o  o").unwrap();
        let won = out.find("Cracked in 2 guesses.").unwrap();
        let bye = out.find("Goodbye").unwrap();
        assert!(resumed < won && won < bye);
    }

    #[test]
    fn menu_survives_bad_choices_and_end_of_input() {
        let (_temp, store) = store();

        let out = menu_script(&store, "9\nhello\n1\n");

        assert_eq!(out.matches("Please enter 1, 2, 3, or 4.").count(), 2);
        assert!(out.contains("Rules:"));
        assert!(!out.contains("Goodbye"));
        assert_eq!(out.matches("Menu:").count(), 4);
    }

    #[test]
    fn load_flow_rejects_empty_slot_then_cancels() {
        let (_temp, store) = store();
        let mut out = Vec::new();

        let loaded = load(&mut Cursor::new("1\nx\nc\n"), &mut out, &store).unwrap();

        assert!(loaded.is_none());
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("That file is empty!"));
        assert!(out.contains("That is an invalid selection."));
        assert!(out.contains("cancelled"));
    }

    #[test]
    fn load_flow_reports_corrupt_record() {
        let (temp, store) = store();
        let mut saved = game("1231");
        store.save(1, &mut saved, "Ada", timestamp()).unwrap();
        std::fs::write(temp.path().join("slot-1.json"), "garbage").unwrap();
        let mut out = Vec::new();

        let loaded = load(&mut Cursor::new("1\n"), &mut out, &store).unwrap();

        assert!(loaded.is_none());
        assert!(String::from_utf8(out).unwrap().contains("Could not load slot 1"));
    }
}
