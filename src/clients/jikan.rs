use super::{ClientOptions, ensure_success, send_with_retry};
use crate::constants::limits::MAX_SEARCH_RESULTS;
use crate::constants::providers::{JIKAN_API, JIKAN_REQUEST_INTERVAL};
use crate::domain::{CanonicalStatus, ExternalIds};
use crate::models::broadcast::BroadcastFact;
use crate::models::provider::{NormalizedProviderRecord, ProviderKind, SearchResult};
use crate::services::provider::{MetadataProvider, ProviderError};
use chrono::{DateTime, NaiveDate};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;
use url::Url;

const PROVIDER: ProviderKind = ProviderKind::Jikan;

#[derive(Debug, Deserialize)]
struct JikanResponse<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
pub struct MalAnime {
    pub mal_id: i32,
    pub title: String,
    pub title_english: Option<String>,
    pub episodes: Option<i32>,
    pub status: Option<String>,
    pub score: Option<f32>,
    pub synopsis: Option<String>,
    pub broadcast: Option<Broadcast>,
    pub genres: Option<Vec<MalGenericInfo>>,
    pub studios: Option<Vec<MalGenericInfo>>,
    pub year: Option<i32>,
    pub aired: Option<Aired>,
}

#[derive(Debug, Deserialize)]
pub struct Aired {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MalGenericInfo {
    pub name: String,
}

/// Weekly slot as MAL publishes it, e.g. `"Saturdays"`, `"23:00"`, `"Asia/Tokyo"`.
#[derive(Debug, Deserialize)]
pub struct Broadcast {
    pub day: Option<String>,
    pub time: Option<String>,
    pub timezone: Option<String>,
}

impl Broadcast {
    /// The slot as a broadcast fact. MAL never provides an exact instant.
    fn to_fact(&self) -> Option<BroadcastFact> {
        let fact = BroadcastFact {
            day: self.day.clone(),
            time: self.time.clone(),
            timezone: self.timezone.clone(),
            airing_at: None,
        };
        fact.is_complete().then_some(fact)
    }
}

impl MalAnime {
    fn canonical_status(&self) -> CanonicalStatus {
        CanonicalStatus::from_mal(self.status.as_deref().unwrap_or_default())
    }

    fn start_year(&self) -> Option<i32> {
        self.year.or_else(|| {
            self.aired
                .as_ref()
                .and_then(|a| parse_aired(a.from.as_deref()))
                .map(|d| chrono::Datelike::year(&d))
        })
    }
}

fn parse_aired(value: Option<&str>) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(value?)
        .ok()
        .map(|d| d.date_naive())
}

fn names(values: Option<Vec<MalGenericInfo>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .map(|v| v.name)
        .collect()
}

/// Maps a Jikan anime object to the provider-agnostic record.
///
/// The broadcast is copied as published. A finished title keeps whatever MAL
/// reports but is never schedule-active.
#[must_use]
pub fn normalize_mal_anime(anime: MalAnime) -> NormalizedProviderRecord {
    let status = anime.canonical_status();
    let broadcast = anime.broadcast.as_ref().and_then(Broadcast::to_fact);
    let aired_from = anime.aired.as_ref().and_then(|a| parse_aired(a.from.as_deref()));
    let aired_to = anime.aired.as_ref().and_then(|a| parse_aired(a.to.as_deref()));

    NormalizedProviderRecord {
        source: PROVIDER,
        external_id: anime.mal_id,
        mal_id: Some(anime.mal_id),
        anilist_id: None,
        title: anime.title,
        status,
        episode_count: anime.episodes,
        genres: names(anime.genres),
        studios: names(anime.studios),
        synopsis: anime.synopsis.filter(|s| !s.trim().is_empty()),
        score: anime.score,
        aired_from,
        aired_to,
        broadcast,
        next_airing: None,
        schedule_active: !status.is_finished(),
    }
}

fn search_result(anime: MalAnime) -> SearchResult {
    SearchResult {
        source: PROVIDER,
        mal_id: Some(anime.mal_id),
        anilist_id: None,
        status: anime.canonical_status(),
        year: anime.start_year(),
        title: anime.title,
        title_english: anime.title_english,
        episode_count: anime.episodes,
        score: anime.score,
        next_airing: None,
    }
}

#[derive(Clone)]
pub struct JikanClient {
    client: Client,
    base_url: String,
    retry_delay: Duration,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl Default for JikanClient {
    fn default() -> Self {
        Self::new()
    }
}

impl JikanClient {
    pub fn new() -> Self {
        Self::with_options(&ClientOptions::new(JIKAN_API))
    }

    pub fn with_options(options: &ClientOptions) -> Self {
        Self {
            client: options.build_client(),
            base_url: options.base_url.trim_end_matches('/').to_string(),
            retry_delay: options.retry_delay,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Keeps consecutive requests from this client at least
    /// [`JIKAN_REQUEST_INTERVAL`] apart.
    async fn pace(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + JIKAN_REQUEST_INTERVAL;
            if ready_at > Instant::now() {
                tokio::time::sleep_until(ready_at).await;
            }
        }
        *last = Some(Instant::now());
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProviderError> {
        Url::parse(&format!("{}/{}", self.base_url, path)).map_err(|e| ProviderError::Http {
            provider: PROVIDER,
            message: format!("invalid URL: {e}"),
        })
    }

    pub async fn get_anime(&self, mal_id: i32) -> Result<Option<MalAnime>, ProviderError> {
        let url = self.endpoint(&format!("anime/{mal_id}"))?;
        debug!(mal_id, "Fetching Jikan details");

        self.pace().await;
        let response = send_with_retry(PROVIDER, self.client.get(url), self.retry_delay).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response: JikanResponse<MalAnime> = ensure_success(PROVIDER, response)?
            .json()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, &e))?;

        Ok(Some(response.data))
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ProviderError> {
        let mut url = self.endpoint("anime")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", &MAX_SEARCH_RESULTS.to_string());

        self.pace().await;
        let response = send_with_retry(PROVIDER, self.client.get(url), self.retry_delay).await?;

        let response: JikanResponse<Vec<MalAnime>> = ensure_success(PROVIDER, response)?
            .json()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, &e))?;

        Ok(response.data.into_iter().map(search_result).collect())
    }
}

#[async_trait::async_trait]
impl MetadataProvider for JikanClient {
    fn kind(&self) -> ProviderKind {
        PROVIDER
    }

    async fn fetch(&self, ids: &ExternalIds) -> Result<NormalizedProviderRecord, ProviderError> {
        let mal_id = ids
            .mal_id
            .ok_or(ProviderError::MissingId { provider: PROVIDER })?;

        self.get_anime(mal_id)
            .await?
            .map(normalize_mal_anime)
            .ok_or_else(|| ProviderError::not_found(PROVIDER, mal_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRIEREN: &str = r#"{
        "data": {
            "mal_id": 52991,
            "title": "Sousou no Frieren",
            "title_english": "Frieren: Beyond Journey's End",
            "episodes": 28,
            "status": "Currently Airing",
            "score": 9.1,
            "synopsis": "During their decade-long quest...",
            "broadcast": {
                "day": "Fridays",
                "time": "23:00",
                "timezone": "Asia/Tokyo",
                "string": "Fridays at 23:00 (JST)"
            },
            "genres": [
                { "mal_id": 2, "name": "Adventure", "url": "https://myanimelist.net/anime/genre/2" },
                { "mal_id": 8, "name": "Drama", "url": "https://myanimelist.net/anime/genre/8" }
            ],
            "studios": [{ "mal_id": 11, "name": "Madhouse", "url": null }],
            "year": 2023,
            "aired": {
                "from": "2023-09-29T00:00:00+00:00",
                "to": null
            }
        }
    }"#;

    fn anime(json: &str) -> MalAnime {
        serde_json::from_str::<JikanResponse<MalAnime>>(json)
            .unwrap()
            .data
    }

    #[test]
    fn airing_anime_keeps_published_broadcast() {
        let record = normalize_mal_anime(anime(FRIEREN));

        assert_eq!(record.source, ProviderKind::Jikan);
        assert_eq!(record.mal_id, Some(52_991));
        assert_eq!(record.anilist_id, None);
        assert_eq!(record.status, CanonicalStatus::Airing);
        assert!(record.schedule_active);
        assert_eq!(record.genres, vec!["Adventure", "Drama"]);
        assert_eq!(record.studios, vec!["Madhouse"]);
        assert_eq!(record.aired_from, NaiveDate::from_ymd_opt(2023, 9, 29));
        assert_eq!(record.aired_to, None);

        let broadcast = record.broadcast.unwrap();
        assert_eq!(broadcast, BroadcastFact::weekly("Fridays", "23:00", "Asia/Tokyo"));
    }

    #[test]
    fn finished_anime_is_not_schedule_active() {
        let json = FRIEREN.replace("Currently Airing", "Finished Airing");
        let record = normalize_mal_anime(anime(&json));

        assert_eq!(record.status, CanonicalStatus::Finished);
        assert!(!record.schedule_active);
    }

    #[test]
    fn incomplete_broadcast_is_dropped() {
        let json = FRIEREN.replace(r#""time": "23:00""#, r#""time": null"#);
        let record = normalize_mal_anime(anime(&json));
        assert!(record.broadcast.is_none());
    }

    #[test]
    fn search_result_falls_back_to_aired_year() {
        let json = FRIEREN.replace(r#""year": 2023"#, r#""year": null"#);
        let result = search_result(anime(&json));
        assert_eq!(result.year, Some(2023));
        assert_eq!(result.mal_id, Some(52_991));
    }

    #[test]
    fn endpoint_joins_base_url() {
        let client = JikanClient::with_options(&ClientOptions::new("https://api.jikan.moe/v4/"));
        let mut url = client.endpoint("anime").unwrap();
        url.query_pairs_mut().append_pair("q", "Frieren & co");
        assert_eq!(
            url.as_str(),
            "https://api.jikan.moe/v4/anime?q=Frieren+%26+co"
        );
    }

    #[tokio::test]
    async fn fetch_without_mal_id_is_missing_id() {
        let client = JikanClient::new();
        let err = client
            .fetch(&ExternalIds::new(None, Some(154_587)))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::MissingId { .. }));
    }
}
