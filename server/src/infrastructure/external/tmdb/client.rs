//! TMDB Client Implementation
//!
//! Bearer-token catalog client with the resolver's HTTP discipline: 10 s
//! per-call timeout, one retry after a jittered back-off on 429, and `None`
//! for every other failure. Callers never see transport errors.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::domain::entities::media_info::MediaInfo;
use crate::domain::value_objects::MediaType;
use crate::infrastructure::external::tmdb::dto::{
    TmdbEntity, TmdbEpisode, TmdbExternalIds, TmdbSearchResponse,
};
use crate::infrastructure::external::tmdb::mapper;
use crate::interfaces::external_services::CatalogService;
use crate::shared::error::TmdbError;

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const RATE_LIMIT_BASE_WAIT_SECS: f64 = 8.0;

/// TMDB API client
pub struct TmdbClient {
    api_token: String,
    http_client: Client,
    base_url: String,
}

impl TmdbClient {
    /// Creates a new TMDB client
    ///
    /// # Arguments
    /// * `api_token` - TMDB bearer token
    ///
    /// # Errors
    /// Returns an error for an empty token or if the HTTP client cannot be
    /// built
    pub fn new(api_token: &str) -> Result<Self, TmdbError> {
        if api_token.trim().is_empty() {
            return Err(TmdbError::InvalidApiKey);
        }

        Ok(Self {
            api_token: api_token.to_string(),
            http_client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .map_err(|e| TmdbError::Network(e.to_string()))?,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Points the client at a different base URL (used by tests)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Sleep duration after a 429: a fixed base plus uniform jitter
    fn debounce_wait() -> Duration {
        let jitter: f64 = rand::thread_rng().gen_range(1.0..3.0);
        Duration::from_secs_f64(RATE_LIMIT_BASE_WAIT_SECS + jitter)
    }

    /// Makes a GET request; returns `None` on every failure path.
    ///
    /// `endpoint` must start with `/`; `language=en-US` is appended when the
    /// caller did not set one.
    async fn make_request<T: DeserializeOwned>(&self, endpoint: &str) -> Option<T> {
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        let url = if endpoint.contains("language=") {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}{}{}language=en-US", self.base_url, endpoint, separator)
        };

        debug!("TMDB API: requesting {}", url);

        let mut response = match self.send(&url).await {
            Some(response) => response,
            None => return None,
        };

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let wait = Self::debounce_wait();
            warn!("TMDB API rate limit exceeded; retrying after {:?}", wait);
            tokio::time::sleep(wait).await;

            response = match self.send(&url).await {
                Some(response) => response,
                None => return None,
            };
        }

        let status = response.status();
        if !status.is_success() {
            error!("TMDB API returned {} for {}", status.as_u16(), url);
            return None;
        }

        match response.json::<T>().await {
            Ok(data) => Some(data),
            Err(err) => {
                error!("Failed to parse TMDB response for {}: {}", url, err);
                None
            }
        }
    }

    async fn send(&self, url: &str) -> Option<reqwest::Response> {
        match self
            .http_client
            .get(url)
            .bearer_auth(&self.api_token)
            .header("Content-Type", "application/json")
            .send()
            .await
        {
            Ok(response) => Some(response),
            Err(err) => {
                error!("TMDB API request failed for {}: {}", url, err);
                None
            }
        }
    }

    async fn search(&self, kind: MediaType, title: &str, year: Option<i32>) -> Option<TmdbEntity> {
        let mut endpoint = format!(
            "/search/{}?query={}&include_adult=true&page=1",
            kind.as_str(),
            urlencoding::encode(title)
        );

        if let Some(year) = year.filter(|y| (1888..=2100).contains(y)) {
            endpoint.push_str(&format!("&year={}", year));
        }

        let response: TmdbSearchResponse = self.make_request(&endpoint).await?;
        let first = response.results.into_iter().next();
        if first.is_none() {
            warn!("No TMDB results for query '{}'", title);
        }
        first
    }
}

#[async_trait]
impl CatalogService for TmdbClient {
    async fn search_movie(&self, title: &str, year: Option<i32>) -> Option<MediaInfo> {
        let entity = self.search(MediaType::Movie, title, year).await?;
        Some(mapper::map_movie(&entity))
    }

    async fn search_series(&self, title: &str, year: Option<i32>) -> Option<MediaInfo> {
        let entity = self.search(MediaType::Tv, title, year).await?;
        Some(mapper::map_series(&entity))
    }

    async fn get_movie_details(&self, tmdb_id: i64) -> Option<MediaInfo> {
        let entity: TmdbEntity = self.make_request(&format!("/movie/{}", tmdb_id)).await?;
        Some(mapper::map_movie(&entity))
    }

    async fn get_series_details(&self, tmdb_id: i64) -> Option<MediaInfo> {
        let entity: TmdbEntity = self.make_request(&format!("/tv/{}", tmdb_id)).await?;
        Some(mapper::map_series(&entity))
    }

    async fn get_episode_details(
        &self,
        series_id: i64,
        season: i32,
        episode: i32,
    ) -> Option<MediaInfo> {
        let payload: TmdbEpisode = self
            .make_request(&format!("/tv/{}/season/{}/episode/{}", series_id, season, episode))
            .await?;
        Some(mapper::map_episode(&payload, series_id, season, episode))
    }

    async fn get_external_ids(
        &self,
        tmdb_id: i64,
        media_type: MediaType,
        season: Option<i32>,
        episode: Option<i32>,
    ) -> Option<MediaInfo> {
        let endpoint = match (media_type, season, episode) {
            (MediaType::Tv, Some(season), Some(episode)) => format!(
                "/tv/{}/season/{}/episode/{}/external_ids",
                tmdb_id, season, episode
            ),
            (MediaType::Tv, _, _) => format!("/tv/{}/external_ids", tmdb_id),
            (MediaType::Movie, _, _) => format!("/movie/{}/external_ids", tmdb_id),
        };

        let payload: TmdbExternalIds = self.make_request(&endpoint).await?;
        Some(mapper::map_external_ids(&payload, tmdb_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_rejected() {
        assert!(matches!(TmdbClient::new(""), Err(TmdbError::InvalidApiKey)));
        assert!(matches!(TmdbClient::new("   "), Err(TmdbError::InvalidApiKey)));
    }

    #[test]
    fn test_debounce_wait_range() {
        for _ in 0..50 {
            let wait = TmdbClient::debounce_wait();
            assert!(wait >= Duration::from_secs_f64(9.0));
            assert!(wait <= Duration::from_secs_f64(11.0));
        }
    }
}
