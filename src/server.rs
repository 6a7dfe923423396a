use axum::{
    extract::Request,
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::Config;
use crate::movies::MovieSource;
use crate::storage::LocalStorage;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Upstream used by the `/api/movies` proxy.
    pub omdb: Arc<dyn MovieSource>,
    /// Source the HTML views fetch from.
    pub movies: Arc<dyn MovieSource>,
    pub storage: Arc<dyn LocalStorage>,
    /// Serializes read-modify-write of the favorites entry.
    pub favorites_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(
        config: Config,
        omdb: Arc<dyn MovieSource>,
        movies: Arc<dyn MovieSource>,
        storage: Arc<dyn LocalStorage>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            omdb,
            movies,
            storage,
            favorites_lock: Arc::new(Mutex::new(())),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/movies/search", get(crate::api::search_movies))
        .route("/api/movies/:imdb_id", get(crate::api::get_movie_details));

    let ui_routes = Router::new()
        .route("/", get(crate::ui::search_page))
        .route("/movie/:imdb_id", get(crate::ui::details_page))
        .route("/favorites", post(crate::ui::toggle_favorite))
        .route("/app.css", get(crate::ui::stylesheet));

    let mut router = Router::new()
        .route("/robots.txt", get(robots_txt_handler))
        .merge(api_routes)
        .merge(ui_routes)
        .fallback(fallback_handler);

    if let Some(ref appdir) = state.config.appdir {
        router = router.fallback_service(ServeDir::new(appdir));
    }

    router
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(cors_layer(&state.config.cors.origins))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

async fn robots_txt_handler() -> &'static str {
    "User-agent: *\nDisallow: /\n"
}

async fn fallback_handler(req: Request<axum::body::Body>) -> impl IntoResponse {
    // CORS preflight for unknown paths
    if req.method() == axum::http::Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}
