//! Row Scorer: token containment scoring
//!
//! Weights per matching token: label 3, description 2, destination 2, and
//! 1 more if the token appears anywhere in the row.

use crate::search::columns::FieldColumns;
use crate::workbook::reader::value_text;
use crate::workbook::Row;

pub const LABEL_WEIGHT: u32 = 3;
pub const DESCRIPTION_WEIGHT: u32 = 2;
pub const DESTINATION_WEIGHT: u32 = 2;
pub const ANY_CELL_WEIGHT: u32 = 1;

/// Whitespace-delimited, case-folded tokens of a query
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .trim()
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Text of a resolved field in a row; empty when the column is absent
pub fn field_text(row: &Row, column: Option<&str>) -> String {
    column
        .and_then(|c| row.get(c))
        .map(value_text)
        .unwrap_or_default()
}

/// Score one row against already tokenized query terms
pub fn score_row(tokens: &[String], row: &Row, fields: &FieldColumns) -> u32 {
    let label = field_text(row, fields.label.as_deref()).to_lowercase();
    let description = field_text(row, fields.description.as_deref()).to_lowercase();
    let destination = field_text(row, fields.destination.as_deref()).to_lowercase();

    let mut score = 0;
    for token in tokens.iter().filter(|t| !t.is_empty()) {
        if label.contains(token.as_str()) {
            score += LABEL_WEIGHT;
        }
        if description.contains(token.as_str()) {
            score += DESCRIPTION_WEIGHT;
        }
        if destination.contains(token.as_str()) {
            score += DESTINATION_WEIGHT;
        }
    }

    // Catch-all so rows without resolved fields can still match
    let all = row
        .values()
        .map(value_text)
        .collect::<Vec<_>>()
        .join(" \n ")
        .to_lowercase();
    for token in tokens.iter().filter(|t| !t.is_empty()) {
        if all.contains(token.as_str()) {
            score += ANY_CELL_WEIGHT;
        }
    }

    score
}
