//! Data structures for MovieScope
//!
//! The movie detail record as returned by TMDB, plus the display helpers the
//! detail screen and the `info` command use to turn it into text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder shown for any field with nothing to display
pub const NOT_AVAILABLE: &str = "N/A";

/// Poster size segment used when building image URLs
pub const POSTER_SIZE: &str = "w500";

// =============================================================================
// Detail Record (TMDB /movie/{id})
// =============================================================================

/// Named category a movie belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
}

/// Production company credited on a movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
}

/// Full metadata for one movie
///
/// Every field beyond `title` is optional on the wire; missing lists
/// deserialize as empty and a missing vote count as 0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetailRecord {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub production_companies: Vec<Company>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// TMDB sends `null` for some fields that are conceptually "empty"
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl DetailRecord {
    /// Year part of the release date ("2022-03-04" -> "2022")
    pub fn release_year(&self) -> String {
        self.release_date
            .split('-')
            .next()
            .unwrap_or_default()
            .to_string()
    }

    /// Runtime in minutes ("148m"), N/A when unknown or zero
    pub fn runtime_label(&self) -> String {
        match self.runtime {
            Some(mins) if mins > 0 => format!("{}m", mins),
            _ => NOT_AVAILABLE.to_string(),
        }
    }

    /// Rounded rating out of ten ("7/10")
    pub fn rating_label(&self) -> String {
        match self.vote_average {
            // halves round up: 6.5 -> 7
            Some(avg) => format!("{}/10", (avg + 0.5).floor() as i64),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    pub fn votes_label(&self) -> String {
        format!("{} votes", self.vote_count)
    }

    pub fn overview_label(&self) -> String {
        or_not_available(&self.overview)
    }

    /// Genre names joined with " - "
    pub fn genres_label(&self) -> String {
        join_names(self.genres.iter().map(|g| g.name.as_str()))
    }

    /// Production company names joined with " - "
    pub fn companies_label(&self) -> String {
        join_names(self.production_companies.iter().map(|c| c.name.as_str()))
    }

    pub fn budget_label(&self) -> String {
        format_millions(self.budget)
    }

    pub fn revenue_label(&self) -> String {
        format_millions(self.revenue)
    }

    /// Absolute poster URL, or None when the record has no poster
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}/{}{}", image_base_url.trim_end_matches('/'), POSTER_SIZE, p))
    }
}

impl fmt::Display for DetailRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year = self.release_year();
        if year.is_empty() {
            write!(f, "{}", self.title)?;
        } else {
            write!(f, "{} ({})", self.title, year)?;
        }
        write!(
            f,
            " - {} - ⭐ {} ({})",
            self.runtime_label(),
            self.rating_label(),
            self.votes_label()
        )
    }
}

fn or_not_available(s: &str) -> String {
    if s.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        s.to_string()
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let joined = names.collect::<Vec<_>>().join(" - ");
    or_not_available(&joined)
}

/// Format a currency amount as "$2.0 million", N/A when absent or zero
fn format_millions(amount: Option<f64>) -> String {
    match amount {
        Some(value) if value != 0.0 => format!("${:.1} million", value / 1_000_000.0),
        _ => NOT_AVAILABLE.to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================
