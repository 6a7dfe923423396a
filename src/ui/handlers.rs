use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::movies::SearchResult;
use crate::server::AppState;

use super::details::DetailsView;
use super::favorites::Favorites;
use super::render;
use super::search::{SearchView, FAVORITES_FAILED_MESSAGE};

#[derive(Debug, Deserialize)]
pub struct SearchPageParams {
    pub q: Option<String>,
}

pub async fn search_page(
    State(state): State<AppState>,
    Query(params): Query<SearchPageParams>,
) -> Html<String> {
    let favorites = Favorites::load(state.storage.as_ref()).await;
    let mut view = SearchView::new(favorites);

    if let Some(query) = params.q {
        view.set_query(query);
        view.submit(state.movies.as_ref()).await;
    }

    Html(render::search_page(&view))
}

pub async fn details_page(
    State(state): State<AppState>,
    Path(imdb_id): Path<String>,
) -> Html<String> {
    let mut view = DetailsView::new(imdb_id);
    view.load(state.movies.as_ref()).await;
    Html(render::details_page(&view))
}

/// Posted by a favorite button. `results` is the JSON list the page was
/// showing, so it can be drawn again without another lookup.
#[derive(Debug, Deserialize)]
pub struct FavoriteForm {
    pub toggle: String,
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub results: String,
}

pub async fn toggle_favorite(
    State(state): State<AppState>,
    Form(form): Form<FavoriteForm>,
) -> Response {
    let shown = shown_results(&form.results);
    let imdb_id = form.toggle;

    let _guard = state.favorites_lock.lock().await;

    // A failed read must not be mistaken for an empty list, or the write
    // below would wipe every saved favorite.
    let favorites = match Favorites::try_load(state.storage.as_ref()).await {
        Ok(favorites) => favorites,
        Err(e) => {
            error!(imdb_id = %imdb_id, "Failed to read favorites, not saving: {}", e);
            let mut view = SearchView::new(Favorites::default());
            view.restore(form.q, shown);
            view.show_error(FAVORITES_FAILED_MESSAGE);
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Html(render::search_page(&view)),
            )
                .into_response();
        }
    };

    let mut view = SearchView::new(favorites);
    view.restore(form.q, shown);

    match view
        .toggle_favorite_by_id(&imdb_id, state.storage.as_ref())
        .await
    {
        Ok(Some(true)) => info!(imdb_id = %imdb_id, "added favorite"),
        Ok(Some(false)) => info!(imdb_id = %imdb_id, "removed favorite"),
        Ok(None) => warn!(imdb_id = %imdb_id, "toggle for a movie not on the page"),
        Err(e) => {
            error!(imdb_id = %imdb_id, "Failed to save favorites: {}", e);
            view.show_error(FAVORITES_FAILED_MESSAGE);
        }
    }

    Html(render::search_page(&view)).into_response()
}

fn shown_results(raw: &str) -> Vec<SearchResult> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!("Ignoring unparsable result list: {}", e);
        Vec::new()
    })
}

pub async fn stylesheet() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        include_str!("app.css"),
    )
}
