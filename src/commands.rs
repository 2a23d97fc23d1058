//! CLI Command Handlers
//!
//! Each handler takes CLI args and Output, returns ExitCode.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::api::{MovieProvider, TmdbClient};
use crate::cli::{ExitCode, InfoCmd, Output};
use crate::config::Config;
use crate::controller::{DetailFetchController, FetchState};
use crate::models::DetailRecord;
use crate::nav::Navigator;

/// Headless stand-in for the navigation host. There is no screen to leave,
/// so navigation requests are only logged.
#[derive(Debug, Default)]
pub struct HeadlessNavigator;

impl Navigator for HeadlessNavigator {
    fn replace_home(&self) {
        debug!("headless lookup asked to return home, ignoring");
    }

    fn go_back_or_home(&self) {
        debug!("headless lookup asked to go back, ignoring");
    }
}

/// Record plus the display strings the detail screen shows
#[derive(Debug, Serialize)]
pub struct MovieInfo<'a> {
    #[serde(flatten)]
    pub record: &'a DetailRecord,
    pub display: MovieDisplay,
}

#[derive(Debug, Serialize)]
pub struct MovieDisplay {
    pub year: String,
    pub runtime: String,
    pub rating: String,
    pub votes: String,
    pub genres: String,
    pub budget: String,
    pub revenue: String,
    pub production_companies: String,
    pub poster_url: Option<String>,
}

impl MovieDisplay {
    pub fn new(record: &DetailRecord, image_base_url: &str) -> Self {
        Self {
            year: record.release_year(),
            runtime: record.runtime_label(),
            rating: record.rating_label(),
            votes: record.votes_label(),
            genres: record.genres_label(),
            budget: record.budget_label(),
            revenue: record.revenue_label(),
            production_companies: record.companies_label(),
            poster_url: record.poster_url(image_base_url),
        }
    }

    fn lines(&self, record: &DetailRecord) -> Vec<String> {
        vec![
            format!("{} ({})", record.title, self.year),
            format!("Runtime:  {}", self.runtime),
            format!("Rating:   {} ({})", self.rating, self.votes),
            format!("Genres:   {}", self.genres),
            format!("Budget:   {}", self.budget),
            format!("Revenue:  {}", self.revenue),
            format!("Studios:  {}", self.production_companies),
            format!(
                "Poster:   {}",
                self.poster_url.as_deref().unwrap_or("N/A")
            ),
            String::new(),
            record.overview_label(),
        ]
    }
}

// =============================================================================
// Info Command
// =============================================================================

pub async fn info_cmd(cmd: InfoCmd, config: &Config, output: &Output) -> ExitCode {
    let Some(api_key) = config.tmdb_api_key() else {
        return output.error(
            "No TMDB API key. Set TMDB_API_KEY or tmdb_api_key in the config file.",
            ExitCode::InvalidArgs,
        );
    };
    let client = TmdbClient::with_base_url(api_key, config.api_base_url());

    output.info(format!("Getting info for: {}", cmd.id));
    info_with_provider(cmd, Arc::new(client), config, output).await
}

/// Drive one detail lookup to completion against any provider
pub async fn info_with_provider(
    cmd: InfoCmd,
    provider: Arc<dyn MovieProvider>,
    config: &Config,
    output: &Output,
) -> ExitCode {
    let mut controller = DetailFetchController::new(provider, Arc::new(HeadlessNavigator))
        .with_redirect_delay(config.redirect_delay());

    if controller.resolve(cmd.id.as_str()) == &FetchState::Skipped {
        return output.error("Invalid movie ID (empty)", ExitCode::InvalidArgs);
    }

    let wait = tokio::time::timeout(Duration::from_secs(cmd.timeout), async {
        while controller.last_failure().is_none() && controller.is_loading() {
            controller.next_update().await;
        }
    })
    .await;

    if wait.is_err() {
        return output.error(
            format!("Timed out after {}s waiting for movie {}", cmd.timeout, cmd.id),
            ExitCode::Timeout,
        );
    }

    if let Some(failure) = controller.last_failure() {
        return output.error(format!("Movie info failed: {}", failure), ExitCode::NetworkError);
    }

    let Some(record) = controller.state().record() else {
        return output.error("Movie lookup ended without a result", ExitCode::Error);
    };

    let display = MovieDisplay::new(record, config.image_base_url());
    if output.json {
        if let Err(e) = output.print(MovieInfo { record, display }) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        output.print_lines(display.lines(record));
    }
    ExitCode::Success
}
