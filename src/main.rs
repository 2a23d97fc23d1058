//! MovieScope - browse TMDB movie details from the terminal
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! moviescope
//!
//! # Open a movie directly
//! moviescope --movie 603
//!
//! # CLI mode (for automation)
//! moviescope info 603 --json
//! ```

use std::io::{stdout, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use moviescope::app::{App, AppSettings};
use moviescope::cli::{Cli, Command, ExitCode, Output};
use moviescope::logging::{self, LogTarget};
use moviescope::{commands, ui, Config, TmdbClient};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_error) = match &cli.config {
        Some(path) => (Config::load_from(path)?, None),
        None => Config::load(),
    };

    if cli.is_cli_mode() {
        logging::init(config.log_level(), LogTarget::Stderr)?;
        warn_config_error(config_error.as_ref());
        let exit_code = run_cli(cli, &config).await;
        std::process::exit(exit_code.into());
    } else {
        let log_path = Config::dir()
            .map(|d| d.join("moviescope.log"))
            .context("Could not determine log directory")?;
        logging::init(config.log_level(), LogTarget::File(&log_path))?;
        warn_config_error(config_error.as_ref());
        run_tui(cli, &config).await
    }
}

fn warn_config_error(error: Option<&anyhow::Error>) {
    if let Some(e) = error {
        tracing::warn!(error = %format!("{:#}", e), "ignoring config file, using defaults");
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: &Config) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Some(Command::Info(cmd)) => commands::info_cmd(cmd, config, &output).await,

        None => {
            // Handled by is_cli_mode check
            ExitCode::Success
        }
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(cli: Cli, config: &Config) -> Result<()> {
    let api_key = config
        .tmdb_api_key()
        .context("No TMDB API key. Set TMDB_API_KEY or tmdb_api_key in the config file.")?;
    let client = TmdbClient::with_base_url(api_key, config.api_base_url());

    let settings = AppSettings {
        image_base_url: config.image_base_url().to_string(),
        redirect_delay: config.redirect_delay(),
    };
    let mut app = App::new(Arc::new(client), settings);
    if let Some(id) = cli.movie {
        app.open_movie(id);
    }

    info!("starting TUI");
    let mut terminal = init_terminal()?;

    let result = run_event_loop(&mut terminal, &mut app).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - handles input, applies background results, renders UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(50);

    while app.running {
        terminal.draw(|frame| ui::render_ui(frame, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Navigation requests and finished fetches
        app.tick();
    }

    Ok(())
}
