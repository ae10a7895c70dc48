//! `TaskFlow`: terminal task tracker with local persistence.
//!
//! Launches the TUI over a task collection stored as a JSON blob in the
//! data directory. Configuration via CLI flags, environment variables, or
//! config file (`~/.config/taskflow/config.toml`).
//!
//! ```bash
//! # Interactive
//! cargo run --bin taskflow
//!
//! # Keep tasks somewhere else and start on the overdue list
//! TASKFLOW_DATA_DIR=/tmp/tasks cargo run --bin taskflow -- --filter overdue
//!
//! # Dump the pending list as an HTML fragment
//! cargo run --bin taskflow -- --filter pending --export-html tasks.html
//! ```

use std::io;
use std::path::Path;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_appender::non_blocking::WorkerGuard;

use taskflow::app::{App, DynStorage};
use taskflow::config::{AppConfig, CliArgs};
use taskflow::markup;
use taskflow::storage::FileStorage;
use taskflow::tasks::{TaskStore, view};
use taskflow::ui;

fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let config = match AppConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("taskflow starting");

    let data_dir = config.resolved_data_dir().map_err(io::Error::other)?;
    let storage: DynStorage = Box::new(FileStorage::open(&data_dir).map_err(io::Error::other)?);
    let store = TaskStore::open(storage, config.storage_key.clone());

    if let Some(path) = cli.export_html.as_deref() {
        return export_html(&store, &config, path);
    }

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let mut app = App::new(store, config.notification_ttl, config.default_filter);
    let result = run_app(&mut terminal, &mut app, &config);

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskflow exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskflow.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Write the list for the configured filter as an HTML fragment.
fn export_html(store: &TaskStore<DynStorage>, config: &AppConfig, path: &Path) -> io::Result<()> {
    let html = markup::render_task_list(store.tasks(), config.default_filter, "", view::today());
    std::fs::write(path, html)?;
    tracing::info!(path = %path.display(), filter = %config.default_filter, "exported task list");
    println!("Wrote {}", path.display());
    Ok(())
}

/// Main application loop.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    config: &AppConfig,
) -> io::Result<()> {
    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Step 2: Expire notifications and roll the date.
        app.tick(Instant::now());

        // Step 3: Poll for keyboard events with a short timeout so the
        // notification timer keeps running while idle.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key_event(key, Instant::now());
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
