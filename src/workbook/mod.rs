//! Row Source: product workbooks exposed as columns and rows
//!
//! Components:
//! - Reader: worksheet range to padded columns/rows with record counting
//! - Store: disk-backed access to the three product workbooks and their index

pub mod reader;
pub mod store;

// Re-export key types
pub use reader::{Row, SheetData, PADDING, PLACEHOLDER};
pub use store::{SheetIndexItem, WorkbookStore};

use crate::errors::Result;
use crate::types::ProductType;

/// Anything that can list and load product sheets.
///
/// The search layer only talks to this trait, so tests can feed it
/// in-memory sheets.
pub trait SheetSource {
    /// Sheet names in workbook order
    fn sheet_names(&self, product: ProductType) -> Result<Vec<String>>;

    /// Load one sheet; fails with `SheetNotFound` for unknown names
    fn load_sheet(&self, product: ProductType, sheet: &str) -> Result<SheetData>;
}

impl<S: SheetSource + ?Sized> SheetSource for &S {
    fn sheet_names(&self, product: ProductType) -> Result<Vec<String>> {
        (**self).sheet_names(product)
    }

    fn load_sheet(&self, product: ProductType, sheet: &str) -> Result<SheetData> {
        (**self).load_sheet(product, sheet)
    }
}

impl<S: SheetSource + ?Sized> SheetSource for std::sync::Arc<S> {
    fn sheet_names(&self, product: ProductType) -> Result<Vec<String>> {
        (**self).sheet_names(product)
    }

    fn load_sheet(&self, product: ProductType, sheet: &str) -> Result<SheetData> {
        (**self).load_sheet(product, sheet)
    }
}
