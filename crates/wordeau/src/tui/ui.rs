//! Stateless UI rendering for the game board and hint keyboard.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use wordeau_core::{Guess, LetterState, MAX_ATTEMPTS, WORD_LENGTH};

use crate::controller::GameSnapshot;
use crate::session::GamePhase;

/// Keyboard rows shown under the board.
pub const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, snapshot: &GameSnapshot, status: &str) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                              // Title
            Constraint::Length(MAX_ATTEMPTS as u16 + 2),        // Board
            Constraint::Length(KEYBOARD_ROWS.len() as u16 + 2), // Keyboard
            Constraint::Length(3),                              // Status
            Constraint::Min(0),
        ])
        .split(area);

    draw_title(frame, chunks[0], snapshot);
    draw_board(frame, chunks[1], snapshot);
    draw_keyboard(frame, chunks[2], snapshot);

    let status_text = Paragraph::new(status)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_text, chunks[3]);

    if snapshot.phase == GamePhase::GameOver {
        draw_game_over(frame, area, snapshot);
    }
}

fn draw_title(frame: &mut Frame, area: Rect, snapshot: &GameSnapshot) {
    let title = match &snapshot.info {
        Some(info) => format!("Wordeau #{}", info.id),
        None => "Wordeau".to_string(),
    };
    let mode = format!(
        "Difficulty: {}  (Tab to switch, Ctrl-N new game, Esc quit)",
        snapshot.difficulty.label()
    );

    let text = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(mode, Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn draw_board(frame: &mut Frame, area: Rect, snapshot: &GameSnapshot) {
    let mut rows: Vec<Line> = snapshot.history.iter().map(guess_row).collect();

    if snapshot.phase == GamePhase::Active && rows.len() < MAX_ATTEMPTS {
        rows.push(buffer_row(&snapshot.buffer));
    }
    while rows.len() < MAX_ATTEMPTS {
        rows.push(buffer_row(""));
    }

    let board = Paragraph::new(rows)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(board, center_rect(area, 24, area.height));
}

fn guess_row(guess: &Guess) -> Line<'static> {
    let spans: Vec<Span> = guess
        .letters()
        .iter()
        .map(|feedback| tile(feedback.letter, Some(feedback.state)))
        .collect();
    Line::from(spans)
}

fn buffer_row(buffer: &str) -> Line<'static> {
    let mut spans: Vec<Span> = buffer.chars().map(|letter| tile(letter, None)).collect();
    while spans.len() < WORD_LENGTH {
        spans.push(Span::styled(" _ ", Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}

fn tile(letter: char, state: Option<LetterState>) -> Span<'static> {
    Span::styled(
        format!(" {} ", letter.to_ascii_uppercase()),
        state_style(state),
    )
}

fn state_style(state: Option<LetterState>) -> Style {
    let base = Style::default().add_modifier(Modifier::BOLD);
    match state {
        Some(LetterState::Correct) => base.bg(Color::Green).fg(Color::Black),
        Some(LetterState::Present) => base.bg(Color::Yellow).fg(Color::Black),
        Some(LetterState::Absent) => base.bg(Color::DarkGray).fg(Color::White),
        None => base.fg(Color::White),
    }
}

fn draw_keyboard(frame: &mut Frame, area: Rect, snapshot: &GameSnapshot) {
    let rows: Vec<Line> = KEYBOARD_ROWS
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .chars()
                .map(|letter| tile(letter, snapshot.hints.letter(letter)))
                .collect();
            Line::from(spans)
        })
        .collect();

    let keyboard = Paragraph::new(rows)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Hints"));
    frame.render_widget(keyboard, area);
}

fn draw_game_over(frame: &mut Frame, area: Rect, snapshot: &GameSnapshot) {
    let popup = center_rect(area, 30, 7);
    let answer = snapshot
        .answer
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "???".to_string());

    let text = vec![
        Line::from(Span::styled(
            "Game Over",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Answer: {}", answer.to_uppercase())),
        Line::from(""),
        Line::from("Ctrl-N: New Game"),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        popup,
    );
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use wordeau_core::derive_hints;

    use crate::api::GameInfo;
    use crate::session::{Answer, Difficulty};

    fn snapshot(phase: GamePhase, answer: Option<Answer>) -> GameSnapshot {
        use LetterState::{Absent, Correct, Present};
        let history =
            vec![Guess::from_word("crane", [Absent, Absent, Present, Absent, Correct]).unwrap()];
        GameSnapshot {
            phase,
            info: Some(GameInfo::new(42, "k".to_string(), 1)),
            buffer: "ab".to_string(),
            hints: derive_hints(&history),
            history,
            answer,
            difficulty: Difficulty::Hard,
            busy: false,
        }
    }

    fn render(snapshot: &GameSnapshot) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| draw(f, snapshot, "Hello")).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_title_and_board() {
        let screen = render(&snapshot(GamePhase::Active, None));
        assert!(screen.contains("Wordeau #42"));
        assert!(screen.contains("Hard Mode"));
        assert!(screen.contains(" C  R  A  N  E "));
        assert!(screen.contains(" A  B "));
    }

    #[test]
    fn test_renders_unknown_answer() {
        let screen = render(&snapshot(GamePhase::GameOver, Some(Answer::Unknown)));
        assert!(screen.contains("Game Over"));
        assert!(screen.contains("Answer: ???"));
    }
}
