use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::source::{MovieSource, SourceError, SourceResult};
use super::types::{parse_lookup, Lookup, MovieDetail, SearchPage};

/// Client for the OMDb API itself. Holds the API key, which never leaves
/// this process.
pub struct OmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> SourceResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn get(&self, params: &[(&str, &str)]) -> SourceResult<String> {
        let mut query = vec![("apikey", self.api_key.as_str())];
        query.extend_from_slice(params);

        let response = self.client.get(&self.base_url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl MovieSource for OmdbClient {
    async fn search(&self, title: &str, page: u32) -> SourceResult<Lookup<SearchPage>> {
        debug!(title, page, "OMDb search");
        let page = page.to_string();
        let body = self.get(&[("s", title), ("page", page.as_str())]).await?;
        Ok(parse_lookup(&body)?)
    }

    async fn details(&self, imdb_id: &str) -> SourceResult<Lookup<MovieDetail>> {
        debug!(imdb_id, "OMDb details");
        let body = self.get(&[("i", imdb_id)]).await?;
        Ok(parse_lookup(&body)?)
    }
}
