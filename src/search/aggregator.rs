//! Candidate Aggregator: scored rows across product workbooks
//!
//! One pass walks products -> sheets -> rows in order, keeps rows with a
//! positive score, widens a single-product scope that found nothing, then
//! ranks and trims the result.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::search::columns::FieldColumns;
use crate::search::scorer::{field_text, score_row, tokenize};
use crate::types::{ProductScope, ProductType};
use crate::workbook::SheetSource;

/// Maximum number of candidates handed to the prompt
pub const MAX_CANDIDATES: usize = 8;

pub const LABEL_LIMIT: usize = 300;
pub const DESCRIPTION_LIMIT: usize = 400;
pub const DESTINATION_LIMIT: usize = 200;

/// A scored row considered relevant to the query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Product label, e.g. "Consumer Savings"
    pub workbook: String,
    /// Sheet name
    pub title: String,
    pub label: String,
    pub description: String,
    pub destination: String,
    pub score: u32,
}

impl Candidate {
    fn truncated(self) -> Self {
        Self {
            label: truncate(&self.label, LABEL_LIMIT),
            description: truncate(&self.description, DESCRIPTION_LIMIT),
            destination: truncate(&self.destination, DESTINATION_LIMIT),
            ..self
        }
    }
}

/// Result of one aggregation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub candidates: Vec<Candidate>,
    /// The fallback pass over the other products ran
    pub widened: bool,
    pub scanned_sheets: usize,
    pub skipped_sheets: usize,
}

/// Cut `text` to at most `limit` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(limit.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Collects candidates from a sheet source
pub struct CandidateAggregator<S: SheetSource> {
    source: S,
}

impl<S: SheetSource> CandidateAggregator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Rank rows of the scoped workbooks against `query`
    pub fn search(&self, query: &str, scope: ProductScope) -> SearchOutcome {
        let tokens = tokenize(query);
        let mut outcome = SearchOutcome::default();

        for product in scope.products() {
            self.collect(product, &tokens, &mut outcome);
        }

        if outcome.candidates.is_empty() {
            let fallback = scope.widened();
            if !fallback.is_empty() {
                info!("No candidates in {}, widening search to other products", scope);
                outcome.widened = true;
                for product in fallback {
                    self.collect(product, &tokens, &mut outcome);
                }
            }
        }

        // Stable: equal scores keep discovery order
        outcome.candidates.sort_by(|a, b| b.score.cmp(&a.score));
        outcome.candidates.truncate(MAX_CANDIDATES);
        outcome.candidates = outcome
            .candidates
            .into_iter()
            .map(Candidate::truncated)
            .collect();

        debug!(
            "Search '{}' in {}: {} candidates from {} sheets ({} skipped)",
            query,
            scope,
            outcome.candidates.len(),
            outcome.scanned_sheets,
            outcome.skipped_sheets
        );
        outcome
    }

    fn collect(&self, product: ProductType, tokens: &[String], outcome: &mut SearchOutcome) {
        let sheets = match self.source.sheet_names(product) {
            Ok(sheets) => sheets,
            Err(e) => {
                warn!("Skipping {} workbook: {}", product, e);
                outcome.skipped_sheets += 1;
                return;
            }
        };

        for sheet in sheets {
            let data = match self.source.load_sheet(product, &sheet) {
                Ok(data) => data,
                Err(e) => {
                    warn!("Skipping sheet '{}' of {}: {}", sheet, product, e);
                    outcome.skipped_sheets += 1;
                    continue;
                }
            };
            outcome.scanned_sheets += 1;

            let fields = FieldColumns::resolve(&data.columns);
            for row in &data.rows {
                let score = score_row(tokens, row, &fields);
                if score == 0 {
                    continue;
                }
                outcome.candidates.push(Candidate {
                    workbook: product.label().to_string(),
                    title: sheet.clone(),
                    label: field_text(row, fields.label.as_deref()),
                    description: field_text(row, fields.description.as_deref()),
                    destination: field_text(row, fields.destination.as_deref()),
                    score,
                });
            }
        }
    }
}
