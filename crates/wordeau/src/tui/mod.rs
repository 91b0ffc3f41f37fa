//! Terminal UI for Wordeau.

mod ui;

pub use ui::{KEYBOARD_ROWS, draw};

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use crate::controller::{GameController, SubmitOutcome};
use crate::input::KeyInput;

type Tui = Terminal<CrosstermBackend<Stdout>>;

const HELP: &str = "Type a word and press Enter";

/// Runs the interactive game until the player quits.
pub async fn run_tui(controller: GameController) -> Result<()> {
    info!("Starting Wordeau TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_game(&mut terminal, controller).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Draws, reads keys and dispatches them. Network calls run on spawned
/// tasks so typing stays responsive; their messages come back on a channel.
#[instrument(skip_all)]
async fn run_game(terminal: &mut Tui, controller: GameController) -> Result<()> {
    let (notice_tx, mut notice_rx) = mpsc::unbounded_channel::<String>();
    let mut status = HELP.to_string();

    if let Err(e) = controller.ensure_started().await {
        warn!(error = %e, "Could not start a game");
        status = format!("{} (Ctrl-N to retry)", e);
    }

    loop {
        while let Ok(notice) = notice_rx.try_recv() {
            status = notice;
        }

        let snapshot = controller.snapshot();
        terminal.draw(|f| draw(f, &snapshot, &status))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        let Some(input) = KeyInput::from_key_event(key) else {
            continue;
        };
        debug!(?input, "Key input");

        match input {
            KeyInput::Quit => {
                info!("User quit");
                return Ok(());
            }
            KeyInput::Letter(_) | KeyInput::DeleteLast if controller.is_busy() => {
                debug!("Edit ignored while a request is in flight");
            }
            KeyInput::Letter(letter) => {
                controller.push_letter(letter);
            }
            KeyInput::DeleteLast => {
                controller.pop_letter();
            }
            KeyInput::Submit => spawn_submit(&controller, &notice_tx),
            KeyInput::NewGame => spawn_new_game(&controller, &notice_tx),
            KeyInput::ToggleDifficulty => {
                let difficulty = controller.toggle_difficulty();
                status = format!("Switched to {}", difficulty.label());
            }
        }
    }
}

fn spawn_submit(controller: &GameController, notices: &mpsc::UnboundedSender<String>) {
    let controller = controller.clone();
    let notices = notices.clone();
    tokio::spawn(async move {
        let notice = match controller.submit().await {
            Ok(SubmitOutcome::Continue { attempts_left, .. }) => {
                Some(format!("{} guesses left", attempts_left))
            }
            Ok(SubmitOutcome::Won { attempts, .. }) => {
                Some(format!("Solved in {}!", attempts))
            }
            Ok(SubmitOutcome::Lost { answer }) => {
                Some(format!("Out of guesses. The word was {}", answer.to_uppercase()))
            }
            Err(e) => {
                debug!(error = %e, recoverable = e.is_recoverable(), "Submission rejected");
                e.notification()
            }
        };
        if let Some(notice) = notice {
            let _ = notices.send(notice);
        }
    });
}

fn spawn_new_game(controller: &GameController, notices: &mpsc::UnboundedSender<String>) {
    let controller = controller.clone();
    let notices = notices.clone();
    tokio::spawn(async move {
        let notice = match controller.reset().await {
            Ok(info) => format!("New game #{}. {}", info.id, HELP),
            Err(e) => e.to_string(),
        };
        let _ = notices.send(notice);
    });
}
