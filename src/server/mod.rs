//! HTTP surface of the dashboard
//!
//! Routes are served both at the root and under `/api`:
//! - `POST /ai`      question answering
//! - `GET  /index`   sheet index of a product workbook
//! - `GET  /sheet`   columns/rows of one sheet
//! - `GET  /filter`  sheet index narrowed by a text query
//! - `GET  /health`  liveness

pub mod error;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::completion::{CompletionBackend, CompletionClient};
use crate::config::Config;
use crate::workbook::WorkbookStore;

pub use error::ApiError;

/// Shared, read-only request state
#[derive(Clone)]
pub struct AppState {
    pub store: WorkbookStore,
    /// `None` when no completion credential is configured
    pub backend: Option<Arc<dyn CompletionBackend>>,
}

impl AppState {
    pub fn new(store: WorkbookStore, backend: Option<Arc<dyn CompletionBackend>>) -> Self {
        Self { store, backend }
    }

    /// State for a configuration; a missing credential only disables `/ai`
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let backend: Option<Arc<dyn CompletionBackend>> = if config.has_token() {
            Some(Arc::new(CompletionClient::from_config(&config.completion)?))
        } else {
            None
        };
        Ok(Self::new(WorkbookStore::new(config.data.clone()), backend))
    }
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/ai", post(handlers::ai))
        .route("/index", get(handlers::index))
        .route("/sheet", get(handlers::sheet))
        .route("/filter", get(handlers::filter))
        .route("/health", get(handlers::health))
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes())
        .nest("/api", routes())
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let state = AppState::from_config(config)?;
    if state.backend.is_none() {
        log::warn!(
            "{} is not set: /ai requests will fail until it is configured",
            crate::config::TOKEN_ENV
        );
    }

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    let local_addr = listener.local_addr()?;
    log::info!("Serving dashboard API on http://{}", local_addr);
    log::info!("Workbooks read from {}", config.data.root.display());

    axum::serve(listener, router(state)).await?;
    Ok(())
}
