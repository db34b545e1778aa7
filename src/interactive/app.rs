//! TUI application state and logic

use crate::core::{Game, GameError, MAX_LEN, Outcome};
use crate::session::{SessionError, SlotEntry, SlotStore, timestamp};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tracing::debug;

/// Longest player name accepted from the keyboard
const MAX_NAME_LEN: usize = 20;

/// Application state
pub struct App {
    pub store: SlotStore,
    pub game: Game,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub slots: Vec<SlotEntry>,
    pub messages: Vec<Message>,
    pub stats: Statistics,
    pub should_quit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Guess,
    SaveSlot,
    LoadSlot,
    PlayerName { slot: usize },
    GameOver,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    pub total_games: usize,
    pub games_won: usize,
}

impl App {
    #[must_use]
    pub fn new(store: SlotStore) -> Self {
        let mut app = Self {
            store,
            game: Game::new(),
            input_mode: InputMode::Guess,
            input_buffer: String::new(),
            slots: Vec::new(),
            messages: Vec::new(),
            stats: Statistics::default(),
            should_quit: false,
        };
        app.add_message(
            "Break the lock! The code is 4-6 digits, each from 0 to 5.",
            MessageStyle::Info,
        );
        app.add_message(
            "Type a guess and press Enter. R = right place, W = wrong place.",
            MessageStyle::Info,
        );
        app.refresh_slots();
        app
    }

    /// Score the typed guess
    pub fn submit_guess(&mut self) {
        let input = std::mem::take(&mut self.input_buffer);

        match self.game.submit(&input) {
            Ok((score, outcome)) => match outcome {
                Outcome::Won => {
                    self.finish_game(true);
                    let round = self.game.round();
                    self.add_message(
                        &format!(
                            "Congratulations, you broke the lock in {round} {}!",
                            if round == 1 { "guess" } else { "guesses" }
                        ),
                        MessageStyle::Success,
                    );
                    self.add_message("Press 'n' for a new game or 'q' to quit.", MessageStyle::Info);
                }
                Outcome::Lost => {
                    self.finish_game(false);
                    self.add_message(
                        "OUT OF TRIES! Our rival has destroyed all the school grades!",
                        MessageStyle::Error,
                    );
                    self.add_message("Press 'n' for a new game or 'q' to quit.", MessageStyle::Info);
                }
                Outcome::InProgress => {
                    self.add_message(
                        &format!(
                            "{input}: {} red, {} white. {} guesses left.",
                            score.exact(),
                            score.partial(),
                            self.game.rounds_left()
                        ),
                        MessageStyle::Info,
                    );
                }
            },
            Err(GameError::InvalidGuess(e)) => {
                self.add_message(&e.to_string(), MessageStyle::Error);
            }
            Err(GameError::GameAlreadyOver) => {
                self.input_mode = InputMode::GameOver;
                self.add_message("This game is over. Press 'n' for a new game.", MessageStyle::Error);
            }
        }
    }

    fn finish_game(&mut self, won: bool) {
        self.stats.total_games += 1;
        if won {
            self.stats.games_won += 1;
        }
        self.input_mode = InputMode::GameOver;
    }

    pub fn new_game(&mut self) {
        self.game = Game::new();
        self.input_buffer.clear();
        self.input_mode = InputMode::Guess;
        self.add_message("New game! A fresh lock awaits.", MessageStyle::Info);
    }

    /// Start choosing a slot to save into
    pub fn begin_save(&mut self) {
        if self.game.is_over() {
            self.add_message("A finished game cannot be saved.", MessageStyle::Error);
            return;
        }
        self.refresh_slots();
        self.input_buffer.clear();
        self.input_mode = InputMode::SaveSlot;
        self.add_message(
            &format!("Choose a slot to overwrite (1-{}), Esc to cancel.", self.store.slots()),
            MessageStyle::Info,
        );
    }

    /// Start choosing a slot to load from
    pub fn begin_load(&mut self) {
        self.refresh_slots();
        self.input_buffer.clear();
        self.input_mode = InputMode::LoadSlot;
        self.add_message(
            &format!("Choose a slot to load (1-{}), Esc to cancel.", self.store.slots()),
            MessageStyle::Info,
        );
    }

    /// Handle a slot number typed while choosing a slot
    pub fn choose_slot(&mut self, key: char) {
        let Some(slot) = key.to_digit(10).map(|d| d as usize) else {
            return;
        };
        if !(1..=self.store.slots()).contains(&slot) {
            self.add_message("That is an invalid selection.", MessageStyle::Error);
            return;
        }

        match self.input_mode {
            InputMode::SaveSlot => {
                self.input_mode = InputMode::PlayerName { slot };
                self.add_message(
                    "What is your name (letters, numbers and spaces)?",
                    MessageStyle::Info,
                );
            }
            InputMode::LoadSlot => self.load_slot(slot),
            _ => {}
        }
    }

    fn load_slot(&mut self, slot: usize) {
        match self.store.load(slot) {
            Ok(game) => {
                let round = game.round();
                self.game = game;
                self.input_mode = InputMode::Guess;
                self.add_message(
                    &format!("Resumed slot {slot} at round {round}."),
                    MessageStyle::Success,
                );
            }
            Err(SessionError::EmptySlot(_)) => {
                self.add_message("That file is empty!", MessageStyle::Error);
            }
            Err(e) => {
                debug!(slot, error = %e, "load failed");
                self.add_message(&format!("Could not load slot {slot}: {e}"), MessageStyle::Error);
                self.cancel();
            }
        }
    }

    /// Save under the typed name, then start a fresh game
    pub fn save_with_name(&mut self) {
        let InputMode::PlayerName { slot } = self.input_mode else {
            return;
        };
        let name = std::mem::take(&mut self.input_buffer);

        match self.store.save(slot, &mut self.game, &name, timestamp()) {
            Ok(()) => {
                self.refresh_slots();
                let player = self
                    .game
                    .meta()
                    .map_or_else(|| name.clone(), |m| m.player.clone());
                self.add_message(
                    &format!("Game saved in slot {slot} as {player}."),
                    MessageStyle::Success,
                );
                self.new_game();
            }
            Err(SessionError::InvalidName(_)) => {
                self.add_message("That is an invalid name.", MessageStyle::Error);
            }
            Err(e) => {
                self.add_message(&format!("Save failed: {e}"), MessageStyle::Error);
                self.cancel();
            }
        }
    }

    /// Leave slot or name entry and return to the game
    pub fn cancel(&mut self) {
        self.input_buffer.clear();
        self.input_mode = if self.game.is_over() {
            InputMode::GameOver
        } else {
            InputMode::Guess
        };
    }

    pub fn refresh_slots(&mut self) {
        match self.store.list() {
            Ok(slots) => self.slots = slots,
            Err(e) => {
                self.slots = vec![SlotEntry::Empty; self.store.slots()];
                self.add_message(&format!("Could not read save slots: {e}"), MessageStyle::Error);
            }
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 6 messages
        if self.messages.len() > 6 {
            self.messages.remove(0);
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                app.should_quit = true;
            }

            match app.input_mode {
                InputMode::Guess => match key.code {
                    KeyCode::Char('q') => app.should_quit = true,
                    KeyCode::Char('n') => app.new_game(),
                    KeyCode::Char('s') => app.begin_save(),
                    KeyCode::Char('l') => app.begin_load(),
                    KeyCode::Char(c) if c.is_ascii_digit() => {
                        if app.input_buffer.len() < MAX_LEN {
                            app.input_buffer.push(c);
                        }
                    }
                    KeyCode::Backspace => {
                        app.input_buffer.pop();
                    }
                    KeyCode::Enter => app.submit_guess(),
                    _ => {}
                },
                InputMode::GameOver => match key.code {
                    KeyCode::Char('q') => app.should_quit = true,
                    KeyCode::Char('n') => app.new_game(),
                    KeyCode::Char('l') => app.begin_load(),
                    _ => {}
                },
                InputMode::SaveSlot | InputMode::LoadSlot => match key.code {
                    KeyCode::Esc => {
                        app.cancel();
                        app.add_message("cancelled", MessageStyle::Info);
                    }
                    KeyCode::Char(c) => app.choose_slot(c),
                    _ => {}
                },
                InputMode::PlayerName { .. } => match key.code {
                    KeyCode::Esc => {
                        app.cancel();
                        app.add_message("cancelled", MessageStyle::Info);
                    }
                    KeyCode::Char(c) if c.is_alphanumeric() || c == ' ' => {
                        if app.input_buffer.chars().count() < MAX_NAME_LEN {
                            app.input_buffer.push(c);
                        }
                    }
                    KeyCode::Backspace => {
                        app.input_buffer.pop();
                    }
                    KeyCode::Enter => app.save_with_name(),
                    _ => {}
                },
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
