use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::source::{MovieSource, SourceError, SourceResult};
use super::types::{parse_lookup, Lookup, MovieDetail, SearchPage};

/// Client for a movie proxy exposing `/api/movies/search` and
/// `/api/movies/{imdbId}`.
pub struct ProxyClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: &str, timeout: Duration) -> SourceResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn search_url(&self, title: &str, page: u32) -> String {
        format!(
            "{}/api/movies/search?title={}&page={}",
            self.base_url,
            urlencoding::encode(title),
            page
        )
    }

    pub fn details_url(&self, imdb_id: &str) -> String {
        format!("{}/api/movies/{}", self.base_url, urlencoding::encode(imdb_id))
    }

    async fn get(&self, url: &str) -> SourceResult<String> {
        debug!(url, "proxy request");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl MovieSource for ProxyClient {
    async fn search(&self, title: &str, page: u32) -> SourceResult<Lookup<SearchPage>> {
        let body = self.get(&self.search_url(title, page)).await?;
        Ok(parse_lookup(&body)?)
    }

    async fn details(&self, imdb_id: &str) -> SourceResult<Lookup<MovieDetail>> {
        let body = self.get(&self.details_url(imdb_id)).await?;
        Ok(parse_lookup(&body)?)
    }
}
