use crate::domain::CanonicalStatus;
use crate::models::broadcast::BroadcastFact;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// GraphQL provider with exact airing timestamps.
    Anilist,
    /// MyAnimeList through the Jikan REST API.
    Jikan,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anilist => f.write_str("AniList"),
            Self::Jikan => f.write_str("Jikan"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextAiring {
    pub airing_at: i64,
    pub episode: Option<i32>,
}

/// Provider-agnostic result of a metadata lookup. Produced per request and
/// merged immediately, never persisted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedProviderRecord {
    pub source: ProviderKind,
    pub external_id: i32,
    pub mal_id: Option<i32>,
    pub anilist_id: Option<i32>,
    pub title: String,
    pub status: CanonicalStatus,
    pub episode_count: Option<i32>,
    pub genres: Vec<String>,
    pub studios: Vec<String>,
    pub synopsis: Option<String>,
    /// Score on a 0-10 scale.
    pub score: Option<f32>,
    pub aired_from: Option<NaiveDate>,
    pub aired_to: Option<NaiveDate>,
    pub broadcast: Option<BroadcastFact>,
    pub next_airing: Option<NextAiring>,
    pub schedule_active: bool,
}

/// Search hit from either provider, used when linking an item by title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub source: ProviderKind,
    pub mal_id: Option<i32>,
    pub anilist_id: Option<i32>,
    pub title: String,
    pub title_english: Option<String>,
    pub status: CanonicalStatus,
    pub episode_count: Option<i32>,
    pub year: Option<i32>,
    pub score: Option<f32>,
    pub next_airing: Option<NextAiring>,
}
