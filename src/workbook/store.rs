//! Disk-backed workbook access
//!
//! Every call re-reads the workbook file: sheets are snapshots of the most
//! recent read, nothing is cached between calls.

use calamine::{open_workbook_auto, Data, Dimensions, Range, Reader, Sheets};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use crate::config::DataConfig;
use crate::errors::{DashboardError, Result};
use crate::types::ProductType;
use crate::workbook::reader::SheetData;
use crate::workbook::SheetSource;

/// One entry of a product's sheet index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetIndexItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub product: ProductType,
    pub records: usize,
    pub last_modified: String,
}

impl SheetIndexItem {
    pub fn new(product: ProductType, name: &str, records: usize, last_modified: &str) -> Self {
        Self {
            id: format!("{}:{}", product.code(), name),
            name: name.to_string(),
            product,
            records,
            last_modified: last_modified.to_string(),
        }
    }
}

/// Reads the three product workbooks from the configured data root
#[derive(Debug, Clone)]
pub struct WorkbookStore {
    data: DataConfig,
}

impl WorkbookStore {
    pub fn new(data: DataConfig) -> Self {
        Self { data }
    }

    pub fn path(&self, product: ProductType) -> PathBuf {
        self.data.workbook_path(product)
    }

    fn open(&self, product: ProductType) -> Result<Sheets<BufReader<File>>> {
        let path = self.path(product);
        open_workbook_auto(&path).map_err(|e| {
            DashboardError::Workbook(format!("Unable to open {}: {}", path.display(), e))
        })
    }

    fn range(
        workbook: &mut Sheets<BufReader<File>>,
        product: ProductType,
        sheet: &str,
    ) -> Result<Range<Data>> {
        if !workbook.sheet_names().iter().any(|name| name == sheet) {
            return Err(DashboardError::SheetNotFound {
                product: product.code().to_string(),
                sheet: sheet.to_string(),
            });
        }
        Ok(workbook.worksheet_range(sheet)?)
    }

    /// End (row, col) of the used range an xlsx sheet declares in its
    /// `<dimension>` element. Other formats have none.
    fn declared_end(
        workbook: &mut Sheets<BufReader<File>>,
        sheet: &str,
    ) -> Result<Option<(u32, u32)>> {
        match workbook {
            Sheets::Xlsx(xlsx) => {
                let dimensions = xlsx
                    .worksheet_cells_reader(sheet)
                    .map_err(calamine::Error::Xlsx)?
                    .dimensions();
                // A sheet without `<dimension>` reads as A1:A1
                Ok((dimensions != Dimensions::default()).then_some(dimensions.end))
            }
            _ => Ok(None),
        }
    }

    fn sheet_data(
        workbook: &mut Sheets<BufReader<File>>,
        product: ProductType,
        sheet: &str,
    ) -> Result<SheetData> {
        let range = Self::range(workbook, product, sheet)?;
        Ok(match Self::declared_end(workbook, sheet)? {
            Some(end) => SheetData::from_range_within(&range, end),
            None => SheetData::from_range(&range),
        })
    }

    /// File modification date as `YYYY-MM-DD` (UTC)
    pub fn last_modified(&self, product: ProductType) -> Result<String> {
        let modified = std::fs::metadata(self.path(product))?.modified()?;
        let modified: DateTime<Utc> = modified.into();
        Ok(modified.format("%Y-%m-%d").to_string())
    }

    /// Sheet index in workbook order
    pub fn index(&self, product: ProductType) -> Result<Vec<SheetIndexItem>> {
        let mut workbook = self.open(product)?;
        let last_modified = self.last_modified(product)?;

        let mut items = Vec::new();
        for name in workbook.sheet_names() {
            let data = Self::sheet_data(&mut workbook, product, &name)?;
            items.push(SheetIndexItem::new(
                product,
                &name,
                data.records,
                &last_modified,
            ));
        }

        Ok(items)
    }
}

impl SheetSource for WorkbookStore {
    fn sheet_names(&self, product: ProductType) -> Result<Vec<String>> {
        Ok(self.open(product)?.sheet_names())
    }

    fn load_sheet(&self, product: ProductType, sheet: &str) -> Result<SheetData> {
        let mut workbook = self.open(product)?;
        Self::sheet_data(&mut workbook, product, sheet)
    }
}
