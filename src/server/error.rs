use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::errors::DashboardError;

/// Handler error rendered as `{"error": "..."}`
#[derive(Debug)]
pub struct ApiError(pub DashboardError);

impl<E> From<E> for ApiError
where
    E: Into<DashboardError>,
{
    fn from(err: E) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            log::error!("Request failed: {}", self.0);
        } else {
            log::debug!("Request rejected: {}", self.0);
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
