use tracing::warn;

use crate::movies::{Lookup, MovieDetail, MovieSource};

pub const NOT_FOUND_MESSAGE: &str = "Movie not found";
pub const DETAILS_FAILED_MESSAGE: &str = "Unable to fetch movie details. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsState {
    Loading,
    Loaded(Box<MovieDetail>),
    Failed(String),
}

/// State behind `/movie/:imdb_id`.
#[derive(Debug)]
pub struct DetailsView {
    imdb_id: String,
    state: DetailsState,
}

impl DetailsView {
    pub fn new(imdb_id: impl Into<String>) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            state: DetailsState::Loading,
        }
    }

    /// Issues the single lookup for this identifier.
    pub async fn load(&mut self, source: &dyn MovieSource) {
        self.state = match source.details(&self.imdb_id).await {
            Ok(Lookup::Found(detail)) => DetailsState::Loaded(Box::new(detail)),
            Ok(Lookup::NotFound(message)) => {
                DetailsState::Failed(message.unwrap_or_else(|| NOT_FOUND_MESSAGE.to_string()))
            }
            Err(e) => {
                warn!(imdb_id = %self.imdb_id, "details lookup failed: {}", e);
                DetailsState::Failed(DETAILS_FAILED_MESSAGE.to_string())
            }
        };
    }

    pub fn imdb_id(&self) -> &str {
        &self.imdb_id
    }

    pub fn state(&self) -> &DetailsState {
        &self.state
    }
}
