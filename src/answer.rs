//! Answer Service: search, prompt, one completion round trip
//!
//! Shared by the HTTP `/ai` handler and the `ask` subcommand.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::completion::CompletionBackend;
use crate::errors::{DashboardError, Result};
use crate::prompt::{build_messages, validate_answer, AnswerFormat};
use crate::search::{CandidateAggregator, SearchOutcome};
use crate::types::messages::{conversational, latest_user_query};
use crate::types::{ChatMessage, ProductScope};
use crate::workbook::SheetSource;

/// Reply to one question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub message: ChatMessage,
    /// Search fell back to the other products
    pub widened: bool,
    pub format: AnswerFormat,
    pub candidates: usize,
}

/// Answers questions about the product workbooks
pub struct AnswerService<S> {
    source: S,
    backend: Arc<dyn CompletionBackend>,
}

impl<S> AnswerService<S>
where
    S: SheetSource + Clone + Send + Sync + 'static,
{
    pub fn new(source: S, backend: Arc<dyn CompletionBackend>) -> Self {
        Self { source, backend }
    }

    /// Run the candidate search off the async runtime
    pub async fn search(&self, query: String, scope: ProductScope) -> Result<SearchOutcome> {
        let source = self.source.clone();
        tokio::task::spawn_blocking(move || CandidateAggregator::new(source).search(&query, scope))
            .await
            .map_err(|e| DashboardError::Internal(format!("Search task failed: {}", e)))
    }

    /// Answer the latest user message of `history`
    pub async fn answer(&self, history: Vec<ChatMessage>, scope: ProductScope) -> Result<Answer> {
        let history = conversational(history);
        if history.is_empty() {
            return Err(DashboardError::Validation("Missing messages".to_string()));
        }

        let query = latest_user_query(&history);
        let outcome = self.search(query, scope).await?;
        let messages = build_messages(&outcome.candidates, history)?;

        debug!(
            "Sending {} messages with {} candidates",
            messages.len(),
            outcome.candidates.len()
        );
        let content = self.backend.complete(&messages).await?;

        let format = validate_answer(&content);
        if format == AnswerFormat::Unknown {
            warn!("Assistant reply does not follow the output format");
        }

        Ok(Answer {
            message: ChatMessage::assistant(content),
            widened: outcome.widened,
            format,
            candidates: outcome.candidates.len(),
        })
    }
}
