//! TUI rendering with ratatui
//!
//! Board, slot list and message panels for the lock game.

use super::app::{App, InputMode, MessageStyle};
use crate::core::{MAX_ROUNDS, Outcome};
use crate::output::formatters::{board_header, board_row, board_turns, code_cells};
use crate::session::SlotEntry;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(16),    // Main content
            Constraint::Length(3),  // Input area
            Constraint::Length(1),  // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50), // Board
            Constraint::Percentage(50), // Side panel
        ])
        .split(chunks[1]);

    render_board(f, app, main_chunks[0]);
    render_side_panel(f, app, main_chunks[1]);

    render_input(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("🔒 LOCKBREAKER - Crack the Elvish Lock")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let game = &app.game;
    let header_color = match game.outcome() {
        Outcome::Won => Color::Green,
        Outcome::Lost => Color::Red,
        Outcome::InProgress => Color::Yellow,
    };

    let mut lines = vec![
        Line::from(Span::styled(
            board_header(game),
            Style::default()
                .fg(header_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "─".repeat(24),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    lines.extend(board_turns(game).map(|turn| match turn {
        Some(turn) => Line::from(vec![
            Span::styled(
                code_cells(Some(&turn.guess)),
                Style::default().fg(Color::White),
            ),
            Span::raw(" | "),
            Span::styled(
                turn.score.exact().to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                turn.score.partial().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        None => Line::from(Span::styled(
            board_row(None),
            Style::default().fg(Color::DarkGray),
        )),
    }));

    let board = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Lock ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(board, area);
}

fn render_side_panel(f: &mut Frame, app: &App, area: Rect) {
    let slot_height = u16::try_from(app.slots.len()).unwrap_or(u16::MAX).saturating_add(2);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // Rounds gauge
            Constraint::Length(slot_height), // Save slots
            Constraint::Min(4),              // Messages
        ])
        .split(area);

    render_rounds(f, app, chunks[0]);
    render_slots(f, app, chunks[1]);
    render_messages(f, app, chunks[2]);
}

fn render_rounds(f: &mut Frame, app: &App, area: Rect) {
    let used = app.game.round();
    let percent = u16::try_from(used * 100 / MAX_ROUNDS).unwrap_or(100);
    let color = if app.game.rounds_left() <= 2 {
        Color::Red
    } else {
        Color::Cyan
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Rounds ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(color))
        .percent(percent)
        .label(format!(
            "{used}/{MAX_ROUNDS} used | {} left",
            app.game.rounds_left()
        ));

    f.render_widget(gauge, area);
}

fn render_slots(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .slots
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = match entry {
                SlotEntry::Empty => Style::default().fg(Color::DarkGray),
                SlotEntry::Occupied { .. } => Style::default().fg(Color::White),
            };
            ListItem::new(format!("{}: {entry}", i + 1)).style(style)
        })
        .collect();

    let highlight = matches!(app.input_mode, InputMode::SaveSlot | InputMode::LoadSlot);
    let border_style = if highlight {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let list = List::new(items).block(
        Block::default()
            .title(" Save Slots ")
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    f.render_widget(list, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, content, color) = match app.input_mode {
        InputMode::Guess => (
            " Enter Guess (4-6 digits, 0-5) ".to_string(),
            app.input_buffer.as_str(),
            Color::Yellow,
        ),
        InputMode::SaveSlot => (
            format!(" Save: choose slot 1-{} | ESC to cancel ", app.store.slots()),
            "",
            Color::Cyan,
        ),
        InputMode::LoadSlot => (
            format!(" Load: choose slot 1-{} | ESC to cancel ", app.store.slots()),
            "",
            Color::Cyan,
        ),
        InputMode::PlayerName { slot } => (
            format!(" Name for slot {slot} | Enter to save, ESC to cancel "),
            app.input_buffer.as_str(),
            Color::Cyan,
        ),
        InputMode::GameOver => (
            " Game over | Press 'n' for new game, 'l' to load or 'q' to quit ".to_string(),
            "",
            Color::Green,
        ),
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let stats_text = format!(
        "Games: {} | Won: {}",
        app.stats.total_games, app.stats.games_won
    );
    let stats = Paragraph::new(stats_text).alignment(Alignment::Center);
    f.render_widget(stats, chunks[0]);

    let help_text = match app.input_mode {
        InputMode::GameOver => "q: Quit | n: New Game | l: Load",
        InputMode::Guess => "q: Quit | n: New | s: Save | l: Load | Enter: Submit",
        _ => "ESC: Cancel",
    };

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Code, Game};
    use crate::session::SlotStore;
    use ratatui::{Terminal, backend::TestBackend, buffer::Cell};

    fn screen(app: &App) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(Cell::symbol).collect())
            .collect()
    }

    fn row_of(lines: &[String], text: &str) -> usize {
        lines.iter().position(|l| l.contains(text)).unwrap()
    }

    #[test]
    fn board_shows_latest_round_first() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut app = App::new(SlotStore::new(temp.path(), 3));
        app.game = Game::with_secret(Code::parse("1231").unwrap());
        app.game.submit("1213").unwrap();
        app.game.submit("0000").unwrap();

        let lines = screen(&app);

        let blank = row_of(&lines, "o  o  o  o  o  o | 0 0");
        let latest = row_of(&lines, "0  0  0  0  o  o | 0 0");
        let first = row_of(&lines, "1  2  1  3  o  o | 2 2");
        assert!(blank < latest);
        assert_eq!(first, latest + 1);
        assert_eq!(
            lines
                .iter()
                .filter(|l| l.contains("o  o  o  o  o  o | 0 0"))
                .count(),
            8
        );
    }
}
