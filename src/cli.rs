//! CLI - Command Line Interface for MovieScope
//!
//! Without a subcommand the interactive TUI starts. Subcommands are for
//! scripting and print JSON when asked (or when stdout is not a terminal).
//!
//! # Examples
//!
//! ```bash
//! # Launch the TUI straight into a movie
//! moviescope --movie 603
//!
//! # Print details for a movie
//! moviescope info 603 --json
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network or API error
    NetworkError = 3,
    /// Lookup did not finish in time
    Timeout = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// MovieScope - browse TMDB movie details from the terminal
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "moviescope",
    version,
    about = "Browse TMDB movie details from the terminal",
    after_help = "EXAMPLES:\n\
                  moviescope                      Launch interactive TUI\n\
                  moviescope --movie 603          Open a movie in the TUI\n\
                  moviescope info 603 --json      Print movie details"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Open the TUI on this movie ID instead of the home screen
    #[arg(long, short = 'm')]
    pub movie: Option<String>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get details for a movie
    #[command(visible_alias = "i")]
    Info(InfoCmd),
}

/// Get detailed information about a movie
#[derive(Args, Debug)]
pub struct InfoCmd {
    /// TMDB movie ID (e.g., 603)
    #[arg(required = true, allow_hyphen_values = true)]
    pub id: String,

    /// Give up waiting for the API after this many seconds
    #[arg(long, default_value = "60")]
    pub timeout: u64,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Standard JSON response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as JSON
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        let output = JsonOutput::success(data);
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    /// Print plain text lines
    pub fn print_lines<I, S>(&self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: std::fmt::Display,
    {
        for line in lines {
            println!("{}", line);
        }
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from(["moviescope"]);
        assert!(!cli.is_cli_mode());
        assert!(cli.movie.is_none());
    }

    #[test]
    fn test_movie_flag() {
        let cli = Cli::parse_from(["moviescope", "--movie", "603"]);
        assert!(!cli.is_cli_mode());
        assert_eq!(cli.movie.as_deref(), Some("603"));
    }

    #[test]
    fn test_info_command() {
        let cli = Cli::parse_from(["moviescope", "info", "603", "--json"]);
        assert!(cli.is_cli_mode());
        assert!(cli.json);
        match cli.command {
            Some(Command::Info(cmd)) => {
                assert_eq!(cmd.id, "603");
                assert_eq!(cmd.timeout, 60);
            }
            _ => panic!("expected info command"),
        }
    }

    #[test]
    fn test_info_alias_and_blank_id() {
        let cli = Cli::parse_from(["moviescope", "i", ""]);
        match cli.command {
            Some(Command::Info(cmd)) => assert_eq!(cmd.id, ""),
            _ => panic!("expected info command"),
        }
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::InvalidArgs), 2);
        assert_eq!(i32::from(ExitCode::NetworkError), 3);
        assert_eq!(i32::from(ExitCode::Timeout), 4);
    }

    #[test]
    fn test_json_error_output() {
        let out = JsonOutput::<()>::error_msg("boom", ExitCode::NetworkError);
        let json = serde_json::to_string(&out).unwrap();
        assert_eq!(json, r#"{"error":"boom","exit_code":3}"#);
    }
}
