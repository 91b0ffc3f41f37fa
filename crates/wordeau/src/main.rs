//! Wordeau - terminal word game client.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use wordeau::{
    Cli, ClientConfig, Command, CommonArgs, Difficulty, GameController, HttpGuessService,
    SessionStore, Slot, SqliteStore, run_tui,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            common,
            api_url,
            normal,
            hard,
        } => run_play(common, api_url, normal, hard).await,
        Command::Status { common } => run_status(common),
        Command::Reset { common } => run_reset(common),
    }
}

fn load_config(common: &CommonArgs) -> Result<ClientConfig> {
    let mut config = ClientConfig::load_or_default(&common.config)?.with_env_overrides();
    if let Some(db_path) = &common.db_path {
        config = config.with_db_path(db_path.clone());
    }
    Ok(config)
}

fn open_store(config: &ClientConfig) -> Result<SqliteStore> {
    let db_path = config.db_path().to_string_lossy().into_owned();
    SqliteStore::open(db_path.clone())
        .with_context(|| format!("Failed to open session database '{}'", db_path))
}

fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Play in the terminal.
async fn run_play(
    common: CommonArgs,
    api_url: Option<String>,
    normal: bool,
    hard: bool,
) -> Result<()> {
    let mut config = load_config(&common)?;
    if let Some(api_url) = api_url {
        config = config.with_api_url(api_url);
    }

    // Log to a file so the terminal UI stays clean
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(api_url = %config.api_url(), db_path = %config.db_path().display(), "Starting wordeau");

    let service = HttpGuessService::new(config.api_url().clone(), config.request_timeout())?;
    let store = SessionStore::new(Arc::new(open_store(&config)?));
    let controller = GameController::restore(Arc::new(service), store)?;

    if normal {
        controller.set_difficulty(Difficulty::Normal);
    } else if hard {
        controller.set_difficulty(Difficulty::Hard);
    }

    run_tui(controller).await
}

/// Print the saved game.
#[instrument(skip_all)]
fn run_status(common: CommonArgs) -> Result<()> {
    init_stderr_logging();
    let config = load_config(&common)?;
    let sqlite = open_store(&config)?;
    let store = SessionStore::new(Arc::new(sqlite.clone()));

    println!("Difficulty: {}", store.load_difficulty()?.label());

    let Some(session) = store.load_session()? else {
        println!("No saved game.");
        return Ok(());
    };

    println!("Game #{} (word {})", session.info().id, session.info().word_id);
    for guess in session.history() {
        println!("  {}", guess.word().to_uppercase());
    }
    match session.answer() {
        Some(answer) => println!("Game over. Answer: {}", answer.to_string().to_uppercase()),
        None => println!("In progress, {} guesses left.", session.attempts_left()),
    }
    if let Some(updated) = sqlite.last_updated(&Slot::Guesses.key())? {
        println!("Last played: {} UTC", updated.format("%Y-%m-%d %H:%M"));
    }
    Ok(())
}

/// Forget the saved game.
#[instrument(skip_all)]
fn run_reset(common: CommonArgs) -> Result<()> {
    init_stderr_logging();
    let config = load_config(&common)?;
    let store = SessionStore::new(Arc::new(open_store(&config)?));
    store.clear_session()?;
    info!("Saved game cleared");
    println!("Saved game cleared.");
    Ok(())
}
