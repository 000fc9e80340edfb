//! Funimation feed HTTP client
//!
//! Pure HTTP client for the legacy `/feeds/ps/` endpoints. Every call
//! fetches one feed, enforces the response-size cap, and hands the raw
//! payload to the normalizer.

use std::sync::LazyLock;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::error::{check_response, json_with_limit, FunimationError};
use crate::normalize::process_response;
use crate::types::Batch;
use crate::urls::build_url;

/// Production feed host.
pub const DEFAULT_HOST: &str = "https://www.funimation.com";

/// Shared HTTP client for all feed requests (connection pooling).
/// Redirects are disabled to prevent SSRF via redirect to private IPs.
static SHARED_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build shared feed HTTP client")
});

/// Funimation feed client.
///
/// Methods map one-to-one onto the browsable feed sections: shows,
/// episodes, movies, clips, trailers and search.
pub struct FunimationClient {
    host: String,
    territory: Option<String>,
    client: Client,
}

impl FunimationClient {
    /// Create a new feed client (reuses shared connection pool).
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            territory: None,
            client: SHARED_CLIENT.clone(),
        }
    }

    /// Create a client with a user-territory tag (the feeds gate some
    /// content by subscription territory via the `ut` parameter).
    pub fn with_territory(host: impl Into<String>, territory: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            territory: Some(territory.into()),
            client: SHARED_CLIENT.clone(),
        }
    }

    /// Get feed host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn territory(&self) -> Option<&str> {
        self.territory.as_deref()
    }

    /// List shows, optionally sorted and filtered by genre.
    pub async fn get_shows(
        &self,
        limit: u64,
        offset: u64,
        sort: Option<&str>,
        genre: Option<&str>,
    ) -> Result<Batch, FunimationError> {
        let mut params = vec![
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        if let Some(sort) = sort {
            params.push(("sort", sort.to_string()));
        }
        if let Some(genre) = genre {
            params.push(("filter", genre.to_string()));
        }
        self.fetch_batch(self.feed_url("shows", params)).await
    }

    /// List episodes of a show.
    pub async fn get_episodes(
        &self,
        show_id: i64,
        limit: u64,
        offset: u64,
    ) -> Result<Batch, FunimationError> {
        let params = vec![
            ("show_id", show_id.to_string()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        self.fetch_batch(self.feed_url("videos", params)).await
    }

    /// List feature-length titles.
    pub async fn get_movies(&self, limit: u64, offset: u64) -> Result<Batch, FunimationError> {
        let params = vec![
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        self.fetch_batch(self.feed_url("movies", params)).await
    }

    /// List clips of a show.
    pub async fn get_clips(
        &self,
        show_id: i64,
        limit: u64,
        offset: u64,
    ) -> Result<Batch, FunimationError> {
        let params = vec![
            ("show_id", show_id.to_string()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        self.fetch_batch(self.feed_url("clips", params)).await
    }

    /// List trailers of a show.
    pub async fn get_trailers(
        &self,
        show_id: i64,
        limit: u64,
        offset: u64,
    ) -> Result<Batch, FunimationError> {
        let params = vec![
            ("show_id", show_id.to_string()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        self.fetch_batch(self.feed_url("trailers", params)).await
    }

    /// Search across the catalog.
    pub async fn search(
        &self,
        query: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Batch, FunimationError> {
        let params = vec![
            ("q", query.to_string()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        self.fetch_batch(self.feed_url("search", params)).await
    }

    fn feed_url(&self, feed: &str, mut params: Vec<(&'static str, String)>) -> String {
        if let Some(ref ut) = self.territory {
            params.push(("ut", ut.clone()));
        }
        build_url(
            &format!("{}/feeds/ps/{feed}", self.host),
            params.iter().map(|(k, v)| (*k, v.as_str())),
        )
    }

    async fn fetch_batch(&self, url: String) -> Result<Batch, FunimationError> {
        tracing::debug!(url = %url, "fetching feed");
        let response = self.client.get(&url).send().await?;
        let response = check_response(response)?;
        let payload: Value = json_with_limit(response).await?;
        let batch = process_response(payload)?;
        tracing::debug!(count = batch.len(), kind = ?batch.kind(), "normalized feed batch");
        Ok(batch)
    }
}
