use async_trait::async_trait;

use super::types::{Lookup, MovieDetail, SearchPage};

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected HTTP status {0}")]
    Status(u16),
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Anything that can answer movie searches and detail lookups in the OMDb
/// response shape.
#[async_trait]
pub trait MovieSource: Send + Sync {
    async fn search(&self, title: &str, page: u32) -> SourceResult<Lookup<SearchPage>>;
    async fn details(&self, imdb_id: &str) -> SourceResult<Lookup<MovieDetail>>;
}
