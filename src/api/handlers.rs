use axum::{
    extract::{Path, Query, State},
    Json,
};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{error, warn};

use crate::movies::Lookup;
use crate::server::AppState;

use super::error::ApiError;

static IMDB_ID: OnceLock<Regex> = OnceLock::new();

fn imdb_id_pattern() -> &'static Regex {
    IMDB_ID.get_or_init(|| Regex::new(r"^tt\d+$").unwrap())
}

pub fn is_valid_imdb_id(id: &str) -> bool {
    imdb_id_pattern().is_match(id)
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub title: Option<String>,
    pub page: Option<u32>,
}

pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, ApiError> {
    let title = params.title.as_deref().unwrap_or_default();
    if title.trim().is_empty() {
        return Err(ApiError::BadRequest("Search title must not be empty".to_string()));
    }

    let page = params.page.unwrap_or(1);

    let lookup = state.omdb.search(title, page).await.map_err(|e| {
        warn!(title, page, "OMDb search failed: {}", e);
        ApiError::Upstream("Failed to fetch movie search results from OMDb".to_string())
    })?;

    respond(&lookup)
}

pub async fn get_movie_details(
    State(state): State<AppState>,
    Path(imdb_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if !is_valid_imdb_id(&imdb_id) {
        return Err(ApiError::BadRequest("Invalid IMDb ID format".to_string()));
    }

    let lookup = state.omdb.details(&imdb_id).await.map_err(|e| {
        warn!(imdb_id = %imdb_id, "OMDb details failed: {}", e);
        ApiError::Upstream("Failed to fetch movie details from OMDb".to_string())
    })?;

    respond(&lookup)
}

fn respond<T: serde::Serialize>(lookup: &Lookup<T>) -> Result<Json<Value>, ApiError> {
    lookup.to_json().map(Json).map_err(|e| {
        error!("Failed to serialize response: {}", e);
        ApiError::Internal
    })
}
