//! Handleliste Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: SQLite data access
//! - auth: Session cookie, password check, guard middleware
//! - api: axum handlers

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::{
    net::TcpListener,
    signal::{self, ctrl_c},
};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{info, warn};

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod repository;

use auth::SessionSigner;
use config::Config;
use repository::{init_db, DbState, ItemRepository, StoreRepository, SuggestionRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub items: Arc<ItemRepository>,
    pub stores: Arc<StoreRepository>,
    pub suggestions: Arc<SuggestionRepository>,
    pub sessions: SessionSigner,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, db: &DbState) -> Self {
        let sessions = SessionSigner::new(config.session_secret(), config.session_days);
        Self {
            items: Arc::new(ItemRepository::new(db.connection())),
            stores: Arc::new(StoreRepository::new(db.connection())),
            suggestions: Arc::new(SuggestionRepository::new(db.connection())),
            sessions,
            config: Arc::new(config),
        }
    }
}

/// API, health check and the static frontend with an `index.html` fallback
pub fn build_router(state: AppState) -> Router {
    let static_dir = &state.config.static_dir;
    let frontend = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/health", get(health))
        .merge(api::router(state.clone()))
        .fallback_service(frontend)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

/// Open the database and serve until Ctrl+C or SIGTERM
pub async fn run(config: Config) -> anyhow::Result<()> {
    config.validate().map_err(anyhow::Error::msg)?;

    if config.session_secret.as_deref().map_or(true, str::is_empty) {
        warn!("SESSION_SECRET not set, using the built-in development secret");
    }
    if config.app_password.is_none() {
        warn!("APP_PASSWORD not set, logins will fail until it is configured");
    }

    info!("Initializing database...");
    let db = init_db(&config.database_path).await?;

    let address = config.listen_addr();
    let state = AppState::new(config, &db);
    let app = build_router(state);

    let listener = TcpListener::bind(address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
