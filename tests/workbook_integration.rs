//! Workbook loading against real xlsx files

mod common;

use bconfig::types::ProductType;
use bconfig::workbook::{SheetSource, WorkbookStore, PADDING, PLACEHOLDER};
use bconfig::DashboardError;
use common::Fixture;
use rust_xlsxwriter::{Format, Workbook};
use serde_json::Value;

#[test]
fn test_sheet_is_padded_past_detected_range() {
    let fixture = Fixture::new();
    let store = WorkbookStore::new(fixture.data());

    let data = store.load_sheet(ProductType::ConsumerSavings, "Limits").unwrap();

    assert_eq!(data.columns.len(), 3 + PADDING as usize);
    assert_eq!(
        &data.columns[..4],
        &["Screen Label", "Description", "Destination", "Column 4"]
    );
    assert_eq!(data.rows.len(), 1 + PADDING as usize);
    assert_eq!(data.records, 1);

    let first = &data.rows[0];
    assert_eq!(first["Screen Label"], Value::from("Daily Withdrawal Limit"));
    assert_eq!(first["Column 4"], Value::from(PLACEHOLDER));
    assert!(data.rows[1..]
        .iter()
        .all(|row| row.values().all(|v| v == &Value::from(PLACEHOLDER))));
}

#[test]
fn test_padding_follows_declared_dimension() {
    let fixture = Fixture::new();
    let path = fixture.dir.path().join("CS.xlsx");

    // A styled blank at G6 widens the declared range to A1:G6
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Styled").unwrap();
    worksheet.write_string(0, 0, "Label").unwrap();
    worksheet.write_string(1, 0, "x").unwrap();
    worksheet.write_blank(5, 6, &bold).unwrap();
    workbook.save(&path).unwrap();

    let store = WorkbookStore::new(fixture.data());
    let data = store.load_sheet(ProductType::ConsumerSavings, "Styled").unwrap();

    assert_eq!(data.columns.len(), 7 + PADDING as usize);
    assert_eq!(data.columns[0], "Label");
    assert_eq!(data.columns[9], "Column 10");
    assert_eq!(data.rows.len(), 5 + PADDING as usize);
    assert_eq!(data.records, 1);
    assert_eq!(data.rows[0]["Label"], Value::from("x"));
}

#[test]
fn test_blank_headers_and_rows() {
    let fixture = Fixture::new();
    let store = WorkbookStore::new(fixture.data());

    let data = store.load_sheet(ProductType::ConsumerSavings, "Rates").unwrap();

    assert_eq!(data.columns[1], "Column 2");
    assert_eq!(data.columns[2], "Notes");
    assert_eq!(data.records, 2);
    assert_eq!(data.rows[1]["Tier"], Value::from(PLACEHOLDER));
    assert_eq!(data.rows[2]["Tier"], Value::from("Premier"));
}

#[test]
fn test_every_row_has_every_column() {
    let fixture = Fixture::new();
    let store = WorkbookStore::new(fixture.data());

    let data = store.load_sheet(ProductType::BusinessChecking, "Alerts").unwrap();
    for row in &data.rows {
        assert_eq!(row.len(), data.columns.len());
        for column in &data.columns {
            assert!(row.contains_key(column));
        }
    }
}

#[test]
fn test_repeated_reads_are_identical() {
    let fixture = Fixture::new();
    let store = WorkbookStore::new(fixture.data());

    let first = store.load_sheet(ProductType::ConsumerChecking, "Overdraft").unwrap();
    let second = store.load_sheet(ProductType::ConsumerChecking, "Overdraft").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unknown_sheet_is_not_found() {
    let fixture = Fixture::new();
    let store = WorkbookStore::new(fixture.data());

    let err = store
        .load_sheet(ProductType::ConsumerSavings, "DoesNotExist")
        .unwrap_err();
    assert!(matches!(err, DashboardError::SheetNotFound { .. }));
    assert_eq!(err.status_code(), 500);
}

#[test]
fn test_index_lists_sheets_in_order() {
    let fixture = Fixture::new();
    let store = WorkbookStore::new(fixture.data());

    let items = store.index(ProductType::ConsumerSavings).unwrap();
    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Limits", "Rates"]);
    assert_eq!(items[0].records, 1);
    assert_eq!(items[1].records, 2);
    assert_eq!(items[0].product, ProductType::ConsumerSavings);
    assert_eq!(items[0].last_modified.len(), "2024-01-01".len());

    let json = serde_json::to_value(&items[0]).unwrap();
    assert_eq!(json["type"], "CS");
    assert!(json.get("lastModified").is_some());
}

#[test]
fn test_missing_workbook_is_an_error() {
    let fixture = Fixture::new();
    std::fs::remove_file(fixture.dir.path().join("CC-LO7.xlsx")).unwrap();
    let store = WorkbookStore::new(fixture.data());

    assert!(store.index(ProductType::ConsumerChecking).is_err());
    assert!(store.sheet_names(ProductType::ConsumerChecking).is_err());
}

#[test]
fn test_doctor_passes_on_complete_data_root() {
    use bconfig::doctor::{Doctor, HealthStatus};

    let fixture = Fixture::new();
    let checks = Doctor::new(fixture.config()).run_diagnostics();

    assert!(Doctor::overall_status(&checks));
    let cs = checks
        .iter()
        .find(|c| c.name.starts_with("Workbook CS"))
        .unwrap();
    assert_eq!(cs.name, "Workbook CS (2 sheets)");
    assert_eq!(cs.status, HealthStatus::Pass);
}
