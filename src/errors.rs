//! Error types for the configuration dashboard
//!
//! Every failure a request can hit maps onto one variant here; the HTTP
//! layer turns them into `{"error": ...}` bodies using `status_code`.

use thiserror::Error;

/// Main error type for workbook access, search and answering
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Missing credential or unusable configuration
    #[error("{0}")]
    Config(String),

    /// Bad or missing request parameters
    #[error("{0}")]
    Validation(String),

    /// Sheet name absent from the product workbook
    #[error("Sheet not found: '{sheet}' in {product} workbook")]
    SheetNotFound { product: String, sheet: String },

    /// Workbook could not be opened or parsed
    #[error("Workbook error: {0}")]
    Workbook(String),

    /// Completion API answered with a non-2xx status
    #[error("LLM error: {status} {body}")]
    Upstream { status: u16, body: String },

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Background task failures and other internal faults
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DashboardError {
    /// HTTP status used when this error reaches a handler.
    ///
    /// Only validation problems are the caller's fault; a missing sheet is
    /// reported as a server error like every other failure.
    pub fn status_code(&self) -> u16 {
        match self {
            DashboardError::Validation(_) => 400,
            _ => 500,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DashboardError::Validation(_))
    }
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Convert anyhow errors to DashboardError
impl From<anyhow::Error> for DashboardError {
    fn from(err: anyhow::Error) -> Self {
        DashboardError::Internal(err.to_string())
    }
}

impl From<calamine::Error> for DashboardError {
    fn from(err: calamine::Error) -> Self {
        DashboardError::Workbook(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_display() {
        let err = DashboardError::Upstream {
            status: 429,
            body: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "LLM error: 429 rate limited");
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_validation_is_client_error() {
        let err = DashboardError::Validation("Invalid type".to_string());
        assert_eq!(err.to_string(), "Invalid type");
        assert_eq!(err.status_code(), 400);
        assert!(err.is_validation());
    }

    #[test]
    fn test_sheet_not_found_is_server_error() {
        let err = DashboardError::SheetNotFound {
            product: "CS".to_string(),
            sheet: "DoesNotExist".to_string(),
        };
        assert!(err.to_string().contains("DoesNotExist"));
        assert_eq!(err.status_code(), 500);
    }
}
