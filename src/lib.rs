pub mod api;
pub mod config;
pub mod middleware;
pub mod movies;
pub mod server;
pub mod storage;
pub mod ui;

use axum::{extract::Request, ServiceExt};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::{make::Shared, util::MapRequestLayer, Layer};
use tracing::info;

use movies::{MovieSource, OmdbClient, ProxyClient};
use storage::{LocalStorage, SqliteStorage};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),
    #[error("HTTP client error: {0}")]
    Client(#[from] movies::SourceError),
    #[error("Server error: {0}")]
    Server(String),
}

pub async fn run(config_path: &str, debug_logs: bool) -> Result<(), ServerError> {
    let config = config::Config::from_file(config_path)?;

    info!("Using config file: {}", config_path);
    if debug_logs {
        info!("Debug logging enabled");
    }

    let api_key = config.get_api_key()?;
    let timeout = Duration::from_secs(config.omdb.timeout);

    info!("Using OMDb at {}", config.omdb.baseurl);
    let omdb: Arc<dyn MovieSource> = Arc::new(OmdbClient::new(&config.omdb.baseurl, &api_key, timeout)?);

    let movies: Arc<dyn MovieSource> = match config.ui.apibase {
        Some(ref apibase) => {
            info!("Pages fetch from movie proxy at {}", apibase);
            Arc::new(ProxyClient::new(apibase, timeout)?)
        }
        None => omdb.clone(),
    };

    if let Some(ref dbdir) = config.dbdir {
        std::fs::create_dir_all(dbdir)
            .map_err(|e| ServerError::Server(format!("Failed to create {}: {}", dbdir, e)))?;
    }

    let db_path = config
        .get_database_path()
        .unwrap_or_else(|| "sqlite://omdb-explorer.db".to_string());

    info!("Opening local storage at {}", db_path);
    let storage: Arc<dyn LocalStorage> = Arc::new(SqliteStorage::new(&db_path).await?);

    let address = config.listen.address.as_deref().unwrap_or("[::]");
    let port = &config.listen.port;
    let addr: SocketAddr = format!("{}:{}", address, port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    let tls = match (&config.listen.tlscert, &config.listen.tlskey) {
        (Some(cert), Some(key)) => Some((cert.clone(), key.clone())),
        _ => None,
    };

    let state = server::AppState::new(config, omdb, movies, storage);
    let router = server::build_router(state);

    if let Some((cert_path, key_path)) = tls {
        info!("Loading TLS certificate from {}", cert_path);
        info!("Loading TLS key from {}", key_path);

        let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(&cert_path, &key_path)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to load TLS config: {}", e)))?;

        info!("Serving HTTPS on {}", addr);

        // Path rewriting has to happen before the router picks a route. The
        // TLS server hands over hyper's own body type, so this service is
        // built separately from the plain HTTP one.
        let app = MapRequestLayer::new(middleware::normalize_path).layer(router);

        axum_server::bind_rustls(addr, tls_config)
            .serve(Shared::new(app))
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    } else {
        info!("Serving HTTP on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

        let app = MapRequestLayer::new(middleware::normalize_path).layer(router);

        axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    }

    Ok(())
}
