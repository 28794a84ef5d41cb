//! Shared fixtures: a data root holding the three product workbooks

#![allow(dead_code)]

use bconfig::config::{Config, DataConfig};
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tempfile::TempDir;

/// Cells of one sheet, header row first
pub struct FixtureSheet {
    pub name: &'static str,
    pub rows: Vec<Vec<&'static str>>,
}

pub fn write_workbook(path: &Path, sheets: &[FixtureSheet]) {
    let mut workbook = Workbook::new();
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name).unwrap();
        for (r, row) in sheet.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if !cell.is_empty() {
                    worksheet.write_string(r as u32, c as u16, *cell).unwrap();
                }
            }
        }
    }
    workbook.save(path).unwrap();
}

/// Temporary data root with BS-8WW.xlsx, CC-LO7.xlsx and CS.xlsx
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();

        write_workbook(
            &dir.path().join("BS-8WW.xlsx"),
            &[FixtureSheet {
                name: "Alerts",
                rows: vec![
                    vec!["Label", "Field Description", "Screen Destination"],
                    vec!["Low Balance Alert", "Notify under threshold", "Alerts>Balance"],
                    vec!["Deposit Alert", "Notify on deposit", "Alerts>Deposits"],
                ],
            }],
        );

        write_workbook(
            &dir.path().join("CC-LO7.xlsx"),
            &[FixtureSheet {
                name: "Overdraft",
                rows: vec![
                    vec!["Screen Label", "Additional Field Description", "Destination"],
                    vec!["Overdraft Fee", "Fee charged per item", "Fees>Overdraft"],
                ],
            }],
        );

        write_workbook(
            &dir.path().join("CS.xlsx"),
            &[
                FixtureSheet {
                    name: "Limits",
                    rows: vec![
                        vec!["Screen Label", "Description", "Destination"],
                        vec!["Daily Withdrawal Limit", "Max ATM withdrawal", "Settings>Limits"],
                    ],
                },
                FixtureSheet {
                    name: "Rates",
                    rows: vec![
                        vec!["Tier", "", "Notes"],
                        vec!["Standard", "", "Interest paid monthly"],
                        vec!["", "", ""],
                        vec!["Premier", "", "Relationship pricing"],
                    ],
                },
            ],
        );

        Self { dir }
    }

    pub fn data(&self) -> DataConfig {
        DataConfig::with_root(self.dir.path())
    }

    pub fn config(&self) -> Config {
        Config {
            data: self.data(),
            ..Config::default()
        }
    }
}
