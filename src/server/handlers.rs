//! HTTP handlers
//!
//! Workbook reads are blocking, so they run on the blocking pool. Every
//! failure leaves as a JSON `{"error": ...}` body.

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::answer::AnswerService;
use crate::config::TOKEN_ENV;
use crate::errors::{DashboardError, Result};
use crate::search::{filter_index, SheetCache};
use crate::types::messages::conversational;
use crate::types::{ChatMessage, ProductScope, ProductType};
use crate::workbook::{SheetData, SheetIndexItem, SheetSource};

use super::error::ApiError;
use super::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct IndexParams {
    #[serde(rename = "type")]
    pub product: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SheetParams {
    #[serde(rename = "type")]
    pub product: Option<String>,
    pub sheet: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    #[serde(rename = "type")]
    pub product: Option<String>,
    pub q: Option<String>,
}

/// Body of `POST /ai`; unparseable bodies are treated as empty
#[derive(Debug, Default, Deserialize)]
pub struct AiRequest {
    #[serde(default)]
    pub messages: Vec<Value>,
    pub product: Option<String>,
}

impl AiRequest {
    fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Well-formed user/assistant messages, in order
    fn chat_messages(&self) -> Vec<ChatMessage> {
        let parsed = self
            .messages
            .iter()
            .filter_map(|m| serde_json::from_value::<ChatMessage>(m.clone()).ok())
            .collect();
        conversational(parsed)
    }
}

#[derive(Debug, Serialize)]
pub struct AiResponse {
    pub message: ChatMessage,
    pub widened: bool,
    pub format: &'static str,
}

async fn blocking<T, F>(task: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| DashboardError::Internal(format!("Worker task failed: {}", e)))?
}

/// `GET /index?type=BC|CC|CS`
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> std::result::Result<Json<Vec<SheetIndexItem>>, ApiError> {
    let product = ProductType::parse_param(params.product.as_deref())?;
    let store = state.store.clone();
    let items = blocking(move || store.index(product)).await?;
    Ok(Json(items))
}

/// `GET /sheet?type=BC|CC|CS&sheet=<name>`
pub async fn sheet(
    State(state): State<AppState>,
    Query(params): Query<SheetParams>,
) -> std::result::Result<Json<SheetData>, ApiError> {
    let product = ProductType::parse_param(params.product.as_deref())?;
    let sheet = params
        .sheet
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DashboardError::Validation("Missing sheet".to_string()))?;

    log::debug!("/sheet {} '{}'", product, sheet);
    let store = state.store.clone();
    let data = blocking(move || store.load_sheet(product, &sheet)).await?;
    Ok(Json(data))
}

/// `GET /filter?type=BC|CC|CS&q=<text>`
pub async fn filter(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> std::result::Result<Json<Vec<SheetIndexItem>>, ApiError> {
    let product = ProductType::parse_param(params.product.as_deref())?;
    let query = params.q.unwrap_or_default();

    let store = state.store.clone();
    let items = blocking(move || {
        let items = store.index(product)?;
        let mut cache = SheetCache::new();
        if !query.trim().is_empty() {
            cache.preload(&store, &items);
        }
        Ok(filter_index(&items, &query, &cache))
    })
    .await?;
    Ok(Json(items))
}

/// `POST /ai`
pub async fn ai(
    State(state): State<AppState>,
    body: Bytes,
) -> std::result::Result<Json<AiResponse>, ApiError> {
    let request = AiRequest::parse(&body);

    let backend = state
        .backend
        .clone()
        .ok_or_else(|| DashboardError::Config(format!("Missing {}", TOKEN_ENV)))?;
    let scope = ProductScope::parse_param(request.product.as_deref())?;
    let messages = request.chat_messages();
    if messages.is_empty() {
        return Err(DashboardError::Validation("Missing messages".to_string()).into());
    }

    log::debug!("/ai scope={} messages={}", scope, messages.len());
    let service = AnswerService::new(state.store.clone(), backend);
    let answer = service.answer(messages, scope).await?;

    Ok(Json(AiResponse {
        message: answer.message,
        widened: answer.widened,
        format: answer.format.name(),
    }))
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
