//! HTTP server
//!
//! Thin axum wrapper exposing the validator through a multipart upload
//! route and a JSON body route, plus the pages and API description.

mod docs;
mod handlers;

pub use docs::{API_TITLE, API_VERSION, api_description};
pub use handlers::AppState;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::datamodel::errors::Result;
use crate::service::ValidationService;

/// Build the application router.
pub fn router(service: ValidationService, config: &ServerConfig) -> Router {
    let state = AppState {
        service,
        api_doc: Arc::new(api_description(config)),
    };

    Router::new()
        .route("/", get(handlers::index))
        .route("/upload", post(handlers::upload))
        .route("/api/validate", post(handlers::validate_body))
        .route("/swagger.json", get(handlers::swagger_json))
        .route("/swagger", get(handlers::swagger_ui))
        .route("/swagger/", get(handlers::swagger_ui))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until ctrl-c.
pub async fn serve(config: ServerConfig, service: ValidationService) -> Result<()> {
    let app = router(service, &config);
    let listener = TcpListener::bind(config.addr()).await?;
    info!(
        "[Server] listening on {} (API docs at {}/swagger)",
        listener.local_addr()?,
        config.base_url()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("[Server] stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // no signal handler available; run until the process is killed
        std::future::pending::<()>().await;
    }
}
