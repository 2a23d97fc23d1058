//! API clients for external services
//!
//! - TMDB: movie metadata by ID

pub mod tmdb;

pub use tmdb::{TmdbClient, TmdbError};

use async_trait::async_trait;

use crate::models::DetailRecord;

/// Source of movie detail records, looked up by opaque ID
#[async_trait]
pub trait MovieProvider: Send + Sync {
    async fn movie_details(&self, id: &str) -> anyhow::Result<DetailRecord>;
}
