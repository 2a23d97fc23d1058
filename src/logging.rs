//! Tracing subscriber setup
//!
//! `RUST_LOG` wins over the configured level. The TUI owns the terminal, so
//! in that mode logs go to a file next to the config instead of stderr.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Where log lines should go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(default_level: &str, target: LogTarget<'_>) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(default_level));

    let installed = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_ok() {
        assert!(init("warn", LogTarget::Stderr).is_ok());
        assert!(init("debug", LogTarget::Stderr).is_ok());
    }
}
