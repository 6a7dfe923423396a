use async_trait::async_trait;
use std::sync::Mutex;

use super::source::{MovieSource, SourceError, SourceResult};
use super::types::{Lookup, MovieDetail, SearchPage, SearchResult};

/// Canned `MovieSource` for tests. `None` replies simulate a transport
/// failure. Every call is recorded.
#[derive(Default)]
pub struct FakeSource {
    pub search_reply: Option<Lookup<SearchPage>>,
    pub details_reply: Option<Lookup<MovieDetail>>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn with_search(reply: Lookup<SearchPage>) -> Self {
        Self {
            search_reply: Some(reply),
            ..Default::default()
        }
    }

    pub fn with_details(reply: Lookup<MovieDetail>) -> Self {
        Self {
            details_reply: Some(reply),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MovieSource for FakeSource {
    async fn search(&self, title: &str, page: u32) -> SourceResult<Lookup<SearchPage>> {
        self.calls.lock().unwrap().push(format!("search:{}:{}", title, page));
        self.search_reply.clone().ok_or(SourceError::Status(503))
    }

    async fn details(&self, imdb_id: &str) -> SourceResult<Lookup<MovieDetail>> {
        self.calls.lock().unwrap().push(format!("details:{}", imdb_id));
        self.details_reply.clone().ok_or(SourceError::Status(503))
    }
}

pub fn movie(imdb_id: &str, title: &str) -> SearchResult {
    SearchResult {
        imdb_id: imdb_id.to_string(),
        title: title.to_string(),
        year: "2005".to_string(),
        item_type: "movie".to_string(),
        poster: "N/A".to_string(),
    }
}

pub fn page(results: Vec<SearchResult>) -> SearchPage {
    SearchPage {
        total_results: Some(results.len().to_string()),
        results,
    }
}
