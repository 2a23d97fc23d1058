//! MovieScope - browse TMDB movie details from the terminal
//!
//! # Modules
//!
//! - `models` - Movie detail record and its display helpers
//! - `route` - Untyped route parameters and identifier validation
//! - `nav` - Navigation history and the navigator capability
//! - `schedule` - Cancelable one-shot deferred tasks
//! - `controller` - Fetch lifecycle for the detail screen
//! - `api` - TMDB client and the movie provider trait
//! - `config` - Config file and API key lookup
//! - `logging` - Tracing subscriber setup
//! - `app` - Application state and key handling
//! - `ui` - TUI components
//! - `cli` / `commands` - Scriptable command line

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod logging;
pub mod models;
pub mod nav;
pub mod route;
pub mod schedule;
pub mod ui;

// Re-export commonly used types
pub use api::{MovieProvider, TmdbClient, TmdbError};
pub use app::{App, AppSettings};
pub use config::Config;
pub use controller::{DetailFetchController, DetailSnapshot, FetchState};
pub use models::{Company, DetailRecord, Genre};
pub use nav::{NavStack, Navigator, Route};
pub use route::{Identifier, RouteParam, Validated};
pub use schedule::ScheduledTask;
