//! TMDB (The Movie Database) API client
//!
//! Movie metadata lookups by ID.
//! API docs: https://developer.themoviedb.org/docs

use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::api::MovieProvider;
use crate::models::DetailRecord;

/// Default TMDB v3 endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default TMDB image CDN root
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest pause between rate-limited attempts, whatever `Retry-After` asks for
const MAX_RETRY_WAIT: Duration = Duration::from_secs(10);

/// TMDB API error types
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("Rate limited (429), retries exhausted")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// TMDB API client
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
    max_retries: u32,
    max_retry_wait: Duration,
}

impl TmdbClient {
    /// Create a new TMDB client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            max_retries: 3,
            max_retry_wait: MAX_RETRY_WAIT,
        }
    }

    /// Set how many 429 responses are tolerated before giving up
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Cap the pause between rate-limited attempts
    pub fn with_max_retry_wait(mut self, max_retry_wait: Duration) -> Self {
        self.max_retry_wait = max_retry_wait;
        self
    }

    /// Make an authenticated GET request with retry logic for rate limits
    async fn get<T: for<'de> Deserialize<'de>>(&self, endpoint: &str) -> Result<T, TmdbError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut retries = 0;

        loop {
            debug!(%url, attempt = retries + 1, "TMDB request");
            let response = self
                .client
                .get(&url)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .header("Accept", "application/json")
                .send()
                .await?;

            match response.status() {
                StatusCode::OK => {
                    let body = response.text().await?;
                    let parsed: T = serde_json::from_str(&body).map_err(|e| {
                        TmdbError::InvalidResponse(format!("JSON parse error: {}", e))
                    })?;
                    return Ok(parsed);
                }
                StatusCode::NOT_FOUND => {
                    return Err(TmdbError::NotFound);
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    retries += 1;
                    if retries >= self.max_retries {
                        return Err(TmdbError::RateLimited);
                    }

                    let retry_after = response
                        .headers()
                        .get("Retry-After")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.trim().parse::<u64>().ok());
                    let wait = retry_wait(retry_after, retries, self.max_retry_wait);

                    warn!(
                        wait_ms = wait.as_millis() as u64,
                        retries, "TMDB rate limited, backing off"
                    );
                    tokio::time::sleep(wait).await;
                    continue;
                }
                status => {
                    return Err(TmdbError::ServerError(status.as_u16()));
                }
            }
        }
    }

    /// Get movie details by ID
    ///
    /// The ID is opaque and sent as a single path segment.
    pub async fn movie_detail(&self, id: &str) -> Result<DetailRecord, TmdbError> {
        let endpoint = format!("/movie/{}", urlencoding::encode(id));
        self.get(&endpoint).await
    }
}

/// Pause before the next attempt: `Retry-After` seconds if given, else
/// exponential backoff, never longer than `cap`
fn retry_wait(retry_after: Option<u64>, retries: u32, cap: Duration) -> Duration {
    let secs = retry_after.unwrap_or_else(|| 2u64.saturating_pow(retries));
    Duration::from_secs(secs).min(cap)
}

#[async_trait]
impl MovieProvider for TmdbClient {
    async fn movie_details(&self, id: &str) -> Result<DetailRecord> {
        Ok(self.movie_detail(id).await?)
    }
}
