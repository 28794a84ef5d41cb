//! Sheet filter over a product index
//!
//! Narrows the sheet list to sheets whose name or cell contents contain a
//! free-text query. Sheet contents come from an explicit `SheetCache` the
//! caller owns.

use log::warn;
use std::collections::HashMap;

use crate::types::ProductType;
use crate::workbook::reader::value_text;
use crate::workbook::{SheetData, SheetIndexItem, SheetSource};

/// Loaded sheets keyed by product and sheet name
#[derive(Debug, Default, Clone)]
pub struct SheetCache {
    sheets: HashMap<(ProductType, String), SheetData>,
}

impl SheetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, product: ProductType, sheet: &str) -> Option<&SheetData> {
        self.sheets.get(&(product, sheet.to_string()))
    }

    pub fn insert(&mut self, product: ProductType, sheet: &str, data: SheetData) {
        self.sheets.insert((product, sheet.to_string()), data);
    }

    pub fn contains(&self, product: ProductType, sheet: &str) -> bool {
        self.sheets.contains_key(&(product, sheet.to_string()))
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Load every indexed sheet not cached yet; failures are skipped
    pub fn preload<S: SheetSource>(&mut self, source: &S, items: &[SheetIndexItem]) {
        for item in items {
            if self.contains(item.product, &item.name) {
                continue;
            }
            match source.load_sheet(item.product, &item.name) {
                Ok(data) => self.insert(item.product, &item.name, data),
                Err(e) => warn!("Could not load sheet '{}' of {}: {}", item.name, item.product, e),
            }
        }
    }
}

/// Keep index items whose name, or any cached cell, contains `query`.
///
/// An empty query keeps everything; uncached sheets only match by name.
pub fn filter_index(
    items: &[SheetIndexItem],
    query: &str,
    cache: &SheetCache,
) -> Vec<SheetIndexItem> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| {
            if item.name.to_lowercase().contains(&query) {
                return true;
            }
            cache
                .get(item.product, &item.name)
                .map(|data| sheet_contains(data, &query))
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

fn sheet_contains(data: &SheetData, query: &str) -> bool {
    data.rows
        .iter()
        .flat_map(|row| row.values())
        .any(|value| value_text(value).to_lowercase().contains(query))
}
