use gloo_net::http::Request;
use serde::Deserialize;

use crate::components::gen_funcs::{
    convert_duration_to_time_string, format_published_date, parse_published_at,
    parse_published_instant,
};
use crate::error::{EpisodeError, PageResult};

/// Where the episode API lives when nothing else is configured. The backing
/// service is a local json-server instance.
pub const DEFAULT_API_BASE: &str = "http://localhost:3333";

/// How many of the newest episodes get their pages generated up front.
pub const PRERENDERED_EPISODE_COUNT: usize = 2;

/// Builds the episode API URLs so every caller shares one base and one
/// query-string convention.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        ApiClient::new(DEFAULT_API_BASE)
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        ApiClient { base_url }
    }

    /// The newest `limit` episodes, ordered by publication date descending.
    pub fn latest_episodes_url(&self, limit: usize) -> String {
        format!(
            "{}/episodes?_limit={}&_sort=published_at&_order=desc",
            self.base_url, limit
        )
    }

    pub fn episode_url(&self, slug: &str) -> String {
        format!("{}/episodes/{}", self.base_url, urlencoding::encode(slug))
    }
}

/// An episode record exactly as the API serves it. The `id` doubles as the
/// slug in episode page routes.
#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct RawEpisode {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub members: String,
    pub published_at: String,
    pub file: RawFile,
    pub description: String,
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct RawFile {
    pub url: String,
    pub duration: RawDuration,
}

/// The feed has served `duration` both as a JSON number and as a numeric
/// string, so the wire type keeps whichever shape arrived.
#[derive(Deserialize, Debug, PartialEq, Clone)]
#[serde(untagged)]
pub enum RawDuration {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl RawDuration {
    /// Coerces the wire value to whole seconds. Fractional, negative and
    /// non-numeric values all fail instead of rounding or defaulting.
    pub fn as_seconds(&self) -> PageResult<u32> {
        match self {
            RawDuration::Number(number) => number
                .as_u64()
                .and_then(|seconds| u32::try_from(seconds).ok())
                .ok_or_else(|| self.invalid()),
            RawDuration::Text(text) => text.trim().parse::<u32>().map_err(|_| self.invalid()),
            RawDuration::Other(_) => Err(self.invalid()),
        }
    }

    fn invalid(&self) -> EpisodeError {
        let value = match self {
            RawDuration::Number(number) => number.to_string(),
            RawDuration::Text(text) => text.clone(),
            RawDuration::Other(value) => value.to_string(),
        };
        EpisodeError::InvalidDuration { value }
    }
}

/// Everything an episode page renders, with dates and durations already in
/// display form.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub members: String,
    pub published_at: String,
    pub thumbnail: String,
    pub url: String,
    pub duration: u32,
    pub duration_as_string: String,
    pub description: String,
}

/// Maps a raw API record into the view model. Duration is checked before the
/// date so a record broken in both ways reports the duration problem.
pub fn map_episode(raw: RawEpisode) -> PageResult<Episode> {
    let duration = raw.file.duration.as_seconds()?;
    let published = parse_published_at(&raw.published_at)?;

    Ok(Episode {
        id: raw.id,
        title: raw.title,
        members: raw.members,
        published_at: format_published_date(published),
        thumbnail: raw.thumbnail,
        url: raw.file.url,
        duration,
        duration_as_string: convert_duration_to_time_string(duration),
        description: raw.description,
    })
}

/// Slugs of the newest `limit` episodes. The API already sorts, but the wire
/// order is re-checked here so a misbehaving upstream cannot demote the
/// newest episodes out of the prerendered set.
pub fn latest_episode_slugs(episodes: &[RawEpisode], limit: usize) -> Vec<String> {
    let mut by_recency: Vec<&RawEpisode> = episodes.iter().collect();
    // Ordering uses the same parse the mapper does, so mixed wire formats
    // compare as instants. Unparsable timestamps sort oldest; the mapper
    // rejects those records later anyway.
    by_recency.sort_by_key(|episode| {
        std::cmp::Reverse(parse_published_instant(&episode.published_at).ok())
    });
    by_recency
        .into_iter()
        .take(limit)
        .map(|episode| episode.id.clone())
        .collect()
}

pub async fn call_get_latest_episodes(
    api: &ApiClient,
    limit: usize,
) -> PageResult<Vec<RawEpisode>> {
    let url = api.latest_episodes_url(limit);
    let response = Request::get(&url)
        .send()
        .await
        .map_err(EpisodeError::upstream)?;

    if response.ok() {
        response.json().await.map_err(EpisodeError::upstream)
    } else {
        Err(EpisodeError::upstream(format!(
            "Failed to fetch latest episodes: {} {}",
            response.status(),
            response.status_text()
        )))
    }
}

pub async fn call_get_episode(api: &ApiClient, slug: &str) -> PageResult<RawEpisode> {
    let url = api.episode_url(slug);
    let response = Request::get(&url)
        .send()
        .await
        .map_err(EpisodeError::upstream)?;

    if response.ok() {
        response.json().await.map_err(EpisodeError::upstream)
    } else {
        Err(EpisodeError::upstream(format!(
            "Failed to fetch episode {}: {} {}",
            slug,
            response.status(),
            response.status_text()
        )))
    }
}

/// Where a fetched record becomes page props. Any fetch error passes through
/// untouched, so no view model is ever built from a failed request.
pub fn episode_props(fetched: PageResult<RawEpisode>) -> PageResult<Episode> {
    map_episode(fetched?)
}

pub async fn call_get_episode_props(api: &ApiClient, slug: &str) -> PageResult<Episode> {
    episode_props(call_get_episode(api, slug).await)
}
