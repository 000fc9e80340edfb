//! Directory service
//!
//! The capability seam between the feed client and whatever renders the
//! results. Collaborators (fetch, string lookup) are injected at
//! construction instead of being reached for ambiently, so list renderers
//! depend only on [`MediaDirectory`].

use async_trait::async_trait;

use crate::client::FunimationClient;
use crate::error::FunimationError;
use crate::strings::{StringResolver, StringTable};
use crate::types::{Batch, EntityKind};

/// Unified media directory interface.
///
/// One method per browsable feed section, plus display-string lookup for
/// the caller's list chrome.
#[async_trait]
pub trait MediaDirectory: Send + Sync {
    async fn shows(
        &self,
        limit: u64,
        offset: u64,
        sort: Option<&str>,
        genre: Option<&str>,
    ) -> Result<Batch, FunimationError>;

    async fn episodes(&self, show_id: i64, limit: u64, offset: u64)
        -> Result<Batch, FunimationError>;

    async fn movies(&self, limit: u64, offset: u64) -> Result<Batch, FunimationError>;

    async fn clips(&self, show_id: i64, limit: u64, offset: u64)
        -> Result<Batch, FunimationError>;

    async fn trailers(&self, show_id: i64, limit: u64, offset: u64)
        -> Result<Batch, FunimationError>;

    async fn search(&self, query: &str, limit: u64, offset: u64)
        -> Result<Batch, FunimationError>;

    /// Display string for a semantic key, falling back to the key.
    fn display_string(&self, key: &str) -> String;
}

/// Directory implementation over the feed client and an injected string
/// resolver.
pub struct FunimationService<R> {
    client: FunimationClient,
    strings: StringTable<R>,
}

impl<R: StringResolver> FunimationService<R> {
    pub const fn new(client: FunimationClient, resolver: R) -> Self {
        Self {
            client,
            strings: StringTable::new(resolver),
        }
    }

    /// Message to show when a section comes back empty. The feeds have no
    /// dedicated empty-catalog message, so show batches use the generic one.
    pub fn no_results_message(&self, kind: EntityKind) -> String {
        let key = match kind {
            EntityKind::Episode => "no_episodes",
            EntityKind::Movie => "no_movies",
            EntityKind::Trailer => "no_trailers",
            EntityKind::Clip => "no_clips",
            EntityKind::Show => "unknown_error",
        };
        self.strings.lookup(key)
    }
}

#[async_trait]
impl<R: StringResolver + Send + Sync> MediaDirectory for FunimationService<R> {
    async fn shows(
        &self,
        limit: u64,
        offset: u64,
        sort: Option<&str>,
        genre: Option<&str>,
    ) -> Result<Batch, FunimationError> {
        self.client.get_shows(limit, offset, sort, genre).await
    }

    async fn episodes(
        &self,
        show_id: i64,
        limit: u64,
        offset: u64,
    ) -> Result<Batch, FunimationError> {
        self.client.get_episodes(show_id, limit, offset).await
    }

    async fn movies(&self, limit: u64, offset: u64) -> Result<Batch, FunimationError> {
        self.client.get_movies(limit, offset).await
    }

    async fn clips(
        &self,
        show_id: i64,
        limit: u64,
        offset: u64,
    ) -> Result<Batch, FunimationError> {
        self.client.get_clips(show_id, limit, offset).await
    }

    async fn trailers(
        &self,
        show_id: i64,
        limit: u64,
        offset: u64,
    ) -> Result<Batch, FunimationError> {
        self.client.get_trailers(show_id, limit, offset).await
    }

    async fn search(&self, query: &str, limit: u64, offset: u64) -> Result<Batch, FunimationError> {
        self.client.search(query, limit, offset).await
    }

    fn display_string(&self, key: &str) -> String {
        self.strings.lookup(key)
    }
}
