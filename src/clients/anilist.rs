use super::{ClientOptions, ensure_success, send_with_retry};
use crate::constants::limits::MAX_SEARCH_RESULTS;
use crate::constants::providers::{ANILIST_API, UPCOMING_EPISODES};
use crate::domain::{CanonicalStatus, ExternalIds};
use crate::models::provider::{NextAiring, NormalizedProviderRecord, ProviderKind, SearchResult};
use crate::schedule::infer_fact_from_timestamp;
use crate::services::provider::{MetadataProvider, ProviderError};
use chrono::NaiveDate;
use chrono_tz::Asia::Tokyo;
use regex::Regex;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

const PROVIDER: ProviderKind = ProviderKind::Anilist;

const DETAILS_QUERY: &str = r"
    query ($id: Int, $idMal: Int, $upcoming: Int) {
        Media(id: $id, idMal: $idMal, type: ANIME) {
            id
            idMal
            title { romaji english native }
            status
            episodes
            description(asHtml: false)
            averageScore
            genres
            studios(isMain: true) { nodes { name } }
            startDate { year month day }
            endDate { year month day }
            nextAiringEpisode { airingAt episode }
            airingSchedule(notYetAired: true, perPage: $upcoming) {
                nodes { airingAt episode }
            }
        }
    }
";

const SEARCH_QUERY: &str = r"
    query ($search: String, $perPage: Int) {
        Page(page: 1, perPage: $perPage) {
            media(search: $search, type: ANIME) {
                id
                idMal
                title { romaji english native }
                status
                episodes
                seasonYear
                averageScore
                nextAiringEpisode { airingAt episode }
            }
        }
    }
";

const MAL_ID_QUERY: &str = r"
    query ($idMal: Int) {
        Media(idMal: $idMal, type: ANIME) { id idMal }
    }
";

#[derive(Serialize)]
struct GraphQLRequest<'a, V> {
    query: &'a str,
    variables: V,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DetailsVariables {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id_mal: Option<i32>,
    upcoming: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchVariables<'a> {
    search: &'a str,
    per_page: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MalIdVariables {
    id_mal: i32,
}

#[derive(Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQLError>,
}

#[derive(Deserialize)]
struct GraphQLError {
    message: String,
    status: Option<u16>,
}

#[derive(Deserialize)]
struct MediaData<M> {
    #[serde(rename = "Media")]
    media: Option<M>,
}

#[derive(Deserialize)]
struct PageData {
    #[serde(rename = "Page")]
    page: Page,
}

#[derive(Deserialize)]
struct Page {
    #[serde(default)]
    media: Vec<Media>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MediaIds {
    id: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: i32,
    pub id_mal: Option<i32>,
    pub title: Title,
    pub status: Option<String>,
    pub episodes: Option<i32>,
    pub description: Option<String>,
    pub average_score: Option<i32>,
    pub genres: Option<Vec<String>>,
    pub studios: Option<Studios>,
    pub start_date: Option<FuzzyDate>,
    pub end_date: Option<FuzzyDate>,
    pub season_year: Option<i32>,
    pub next_airing_episode: Option<AiringNode>,
    pub airing_schedule: Option<AiringSchedule>,
}

#[derive(Debug, Deserialize)]
pub struct Title {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Studios {
    pub nodes: Vec<StudioNode>,
}

#[derive(Debug, Deserialize)]
pub struct StudioNode {
    pub name: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FuzzyDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl FuzzyDate {
    /// Missing month or day default to the first.
    #[must_use]
    pub fn to_naive_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month.unwrap_or(1), self.day.unwrap_or(1))
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiringNode {
    pub airing_at: i64,
    pub episode: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct AiringSchedule {
    #[serde(default)]
    pub nodes: Vec<AiringNode>,
}

impl Media {
    fn display_title(&self) -> String {
        self.title
            .romaji
            .clone()
            .or_else(|| self.title.english.clone())
            .or_else(|| self.title.native.clone())
            .unwrap_or_default()
    }

    fn is_releasing(&self) -> bool {
        matches!(self.status.as_deref(), Some("RELEASING" | "HIATUS"))
    }

    /// `nextAiringEpisode`, else the first upcoming schedule node.
    fn next_airing(&self) -> Option<NextAiring> {
        self.next_airing_episode
            .or_else(|| {
                self.airing_schedule
                    .as_ref()
                    .and_then(|s| s.nodes.first().copied())
            })
            .map(|node| NextAiring {
                airing_at: node.airing_at,
                episode: node.episode,
            })
    }
}

/// Strips HTML tags and decodes entities from an AniList description.
fn clean_description(raw: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let html_tag = RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("Invalid regex"));

    let without_tags = html_tag.replace_all(raw, "");
    let decoded = html_escape::decode_html_entities(&without_tags);
    let trimmed = decoded.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[allow(clippy::cast_precision_loss)]
fn normalize_score(average_score: Option<i32>) -> Option<f32> {
    average_score.map(|s| s as f32 / 10.0)
}

/// Maps an AniList media object to the provider-agnostic record.
///
/// Next-airing data and the derived broadcast only exist while the show is
/// releasing or on hiatus. Finished titles often still carry historical
/// schedule nodes, which are ignored.
#[must_use]
pub fn normalize_media(media: Media) -> NormalizedProviderRecord {
    let status = CanonicalStatus::from_anilist(media.status.as_deref().unwrap_or_default());
    let next_airing = if media.is_releasing() {
        media.next_airing()
    } else {
        None
    };
    let broadcast = next_airing.and_then(|next| infer_fact_from_timestamp(next.airing_at, Tokyo));
    let title = media.display_title();

    NormalizedProviderRecord {
        source: PROVIDER,
        external_id: media.id,
        mal_id: media.id_mal,
        anilist_id: Some(media.id),
        title,
        status,
        episode_count: media.episodes,
        genres: media.genres.unwrap_or_default(),
        studios: media
            .studios
            .map(|s| s.nodes.into_iter().map(|n| n.name).collect())
            .unwrap_or_default(),
        synopsis: media.description.as_deref().and_then(clean_description),
        score: normalize_score(media.average_score),
        aired_from: media.start_date.and_then(FuzzyDate::to_naive_date),
        aired_to: media.end_date.and_then(FuzzyDate::to_naive_date),
        broadcast,
        next_airing,
        schedule_active: !status.is_finished(),
    }
}

fn search_result(media: Media) -> SearchResult {
    let status = CanonicalStatus::from_anilist(media.status.as_deref().unwrap_or_default());
    let next_airing = if media.is_releasing() {
        media.next_airing()
    } else {
        None
    };

    SearchResult {
        source: PROVIDER,
        mal_id: media.id_mal,
        anilist_id: Some(media.id),
        title: media.display_title(),
        title_english: media.title.english,
        status,
        episode_count: media.episodes,
        year: media.season_year,
        score: normalize_score(media.average_score),
        next_airing,
    }
}

#[derive(Clone)]
pub struct AnilistClient {
    client: Client,
    base_url: String,
    retry_delay: Duration,
}

impl Default for AnilistClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AnilistClient {
    pub fn new() -> Self {
        Self::with_options(&ClientOptions::new(ANILIST_API))
    }

    pub fn with_options(options: &ClientOptions) -> Self {
        Self {
            client: options.build_client(),
            base_url: options.base_url.clone(),
            retry_delay: options.retry_delay,
        }
    }

    /// Posts a GraphQL query and unwraps the `data` member.
    ///
    /// AniList answers unknown ids with HTTP 404 and a GraphQL error body, so
    /// a 404 (or a GraphQL error carrying status 404) becomes `Ok(None)`.
    async fn query<V, T>(&self, query: &str, variables: V) -> Result<Option<T>, ProviderError>
    where
        V: Serialize + Send,
        T: DeserializeOwned,
    {
        let request = self.client.post(&self.base_url).json(&GraphQLRequest { query, variables });

        let response = send_with_retry(PROVIDER, request, self.retry_delay).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = ensure_success(PROVIDER, response)?;

        let body: GraphQLResponse<T> = response
            .json()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, &e))?;

        if !body.errors.is_empty() {
            if body.errors.iter().all(|e| e.status == Some(404)) {
                return Ok(None);
            }
            let message = body
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ProviderError::GraphQl {
                provider: PROVIDER,
                message,
            });
        }

        Ok(body.data)
    }

    /// Full details by AniList id, or by MAL id when no AniList id is known.
    pub async fn get_details(&self, ids: &ExternalIds) -> Result<Media, ProviderError> {
        let variables = match (ids.anilist_id, ids.mal_id) {
            (Some(id), _) => DetailsVariables {
                id: Some(id),
                id_mal: None,
                upcoming: UPCOMING_EPISODES,
            },
            (None, Some(mal_id)) => DetailsVariables {
                id: None,
                id_mal: Some(mal_id),
                upcoming: UPCOMING_EPISODES,
            },
            (None, None) => return Err(ProviderError::MissingId { provider: PROVIDER }),
        };
        let lookup_key = variables
            .id
            .map_or_else(|| format!("malId {}", variables.id_mal.unwrap_or_default()), |id| format!("id {id}"));

        debug!(key = %lookup_key, "Fetching AniList details");

        let data: Option<MediaData<Media>> = self.query(DETAILS_QUERY, variables).await?;
        data.and_then(|d| d.media)
            .ok_or_else(|| ProviderError::not_found(PROVIDER, lookup_key))
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ProviderError> {
        let variables = SearchVariables {
            search: query,
            per_page: MAX_SEARCH_RESULTS,
        };

        let data: Option<PageData> = self.query(SEARCH_QUERY, variables).await?;

        Ok(data
            .map(|d| d.page.media.into_iter().map(search_result).collect())
            .unwrap_or_default())
    }

    /// AniList id for a MAL id, `None` when AniList does not map it.
    pub async fn anilist_id_for_mal(&self, mal_id: i32) -> Result<Option<i32>, ProviderError> {
        let data: Option<MediaData<MediaIds>> = self
            .query(MAL_ID_QUERY, MalIdVariables { id_mal: mal_id })
            .await?;

        Ok(data.and_then(|d| d.media).map(|m| m.id))
    }
}

#[async_trait::async_trait]
impl MetadataProvider for AnilistClient {
    fn kind(&self) -> ProviderKind {
        PROVIDER
    }

    async fn fetch(&self, ids: &ExternalIds) -> Result<NormalizedProviderRecord, ProviderError> {
        self.get_details(ids).await.map(normalize_media)
    }
}
