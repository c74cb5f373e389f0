use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use connect_four::config::AppConfig;
use connect_four::game::GameEngine;
use connect_four::snapshot::SnapshotStore;
use connect_four::ui::App;

/// Play Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect_four", about = "Play Connect Four in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override board height (rows)
    #[arg(long)]
    height: Option<usize>,

    /// Override board width (columns)
    #[arg(long)]
    width: Option<usize>,

    /// Override player 1's color
    #[arg(long)]
    player1_color: Option<String>,

    /// Override player 2's color
    #[arg(long)]
    player2_color: Option<String>,

    /// Resume the game saved at the configured snapshot path
    #[arg(long)]
    resume: bool,

    /// Write logs to this file (filtered by RUST_LOG, default "info").
    /// Without it nothing is logged, since the UI owns the terminal.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(height) = cli.height {
        config.board.height = height;
    }
    if let Some(width) = cli.width {
        config.board.width = width;
    }
    if let Some(color) = cli.player1_color {
        config.players.player1_color = color;
    }
    if let Some(color) = cli.player2_color {
        config.players.player2_color = color;
    }
    config.validate().context("validating configuration")?;

    if cli.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let store = SnapshotStore::new(config.snapshot.path.clone());
    let engine = if cli.resume {
        let mut engine = store
            .load()
            .with_context(|| format!("resuming from {}", store.path().display()))?;
        if !engine.adopt_config(&config) {
            warn!(
                saved_height = engine.board().height(),
                saved_width = engine.board().width(),
                "configured board size ignored on resume"
            );
        }
        engine
    } else {
        GameEngine::from_config(&config).context("creating game")?
    };

    info!(
        height = engine.board().height(),
        width = engine.board().width(),
        resumed = cli.resume,
        "launching terminal UI"
    );
    run_tui(App::new(engine, store)).context("running terminal UI")
}

/// Install a file-backed subscriber when a log file is given. Returns
/// whether one was installed.
fn init_tracing(log_file: Option<&Path>) -> Result<bool> {
    // Stderr output would draw over the alternate screen
    let Some(path) = log_file else {
        return Ok(false);
    };
    let file =
        File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(true)
}

fn run_tui(mut app: App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_log_file_installs_no_subscriber() {
        assert!(!init_tracing(None).unwrap());
        assert!(!tracing::dispatcher::has_been_set());
    }
}
