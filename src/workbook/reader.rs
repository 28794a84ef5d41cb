//! Worksheet range to columns/rows conversion
//!
//! The detected data range of a sheet is read with a fixed margin of extra
//! rows and columns so headers or values sitting just past the range the
//! file reports still come through. Row 0 is always the header row.

use calamine::{Data, Range};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Extra rows and columns read past the detected range
pub const PADDING: u32 = 3;

/// Value stored for blank cells
pub const PLACEHOLDER: &str = "-";

/// A sheet row: every column of the sheet is present as a key
pub type Row = Map<String, Value>;

/// Columns, rows and record count of one sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetData {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub records: usize,
}

impl SheetData {
    /// Convert a worksheet range into sheet data, measuring the used range
    /// from the cells the range actually holds
    pub fn from_range(range: &Range<Data>) -> Self {
        Self::from_range_within(range, range.end().unwrap_or((0, 0)))
    }

    /// Convert a worksheet range into sheet data against the used range the
    /// sheet declares, ending at `used_end` (row, col).
    ///
    /// Cells past `used_end` plus the padding margin are not read.
    pub fn from_range_within(range: &Range<Data>, used_end: (u32, u32)) -> Self {
        let (last_row, last_col) = used_end;
        let columns = detect_columns(range, last_col);
        let (rows, records) = read_rows(range, &columns, last_row, last_col);
        Self {
            columns,
            rows,
            records,
        }
    }
}

/// Header names for every column up to the padded width.
/// Blank headers become `Column N` with N the 1-based position.
pub fn detect_columns(range: &Range<Data>, last_col: u32) -> Vec<String> {
    let width = (last_col + 1 + PADDING).max(1);
    (0..width)
        .map(|c| {
            range
                .get_value((0, c))
                .and_then(cell_text)
                .unwrap_or_else(|| format!("Column {}", c + 1))
        })
        .collect()
}

/// Rows below the header, padded past the last detected row.
///
/// A row counts as a record only when a non-blank cell sits inside the
/// detected range; the padding margin never makes a row count.
pub fn read_rows(
    range: &Range<Data>,
    columns: &[String],
    last_row: u32,
    last_col: u32,
) -> (Vec<Row>, usize) {
    let end_row = (last_row + 1 + PADDING).max(1);
    let mut rows = Vec::with_capacity(end_row as usize);
    let mut records = 0;

    for r in 1..end_row {
        let mut row = Row::new();
        let mut has_any = false;

        for (c, column) in columns.iter().enumerate() {
            let c = c as u32;
            let value = range.get_value((r, c)).and_then(cell_value);
            if !has_any && value.is_some() && r <= last_row && c <= last_col {
                has_any = true;
            }
            row.insert(
                column.clone(),
                value.unwrap_or_else(|| Value::String(PLACEHOLDER.to_string())),
            );
        }

        if has_any {
            records += 1;
        }
        rows.push(row);
    }

    (rows, records)
}

/// JSON value of a cell, or `None` when the cell is blank
pub fn cell_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty => None,
        Data::String(s) => {
            if s.trim().is_empty() {
                None
            } else {
                Some(Value::String(s.clone()))
            }
        }
        Data::Int(n) => Some(Value::from(*n)),
        Data::Float(n) => {
            // Integral floats render without a decimal point
            if n.fract() == 0.0 && n.abs() < 1e15 {
                Some(Value::from(*n as i64))
            } else {
                serde_json::Number::from_f64(*n).map(Value::Number)
            }
        }
        Data::Bool(b) => Some(Value::Bool(*b)),
        Data::Error(e) => Some(Value::String(e.to_string())),
        other => {
            let text = other.to_string();
            if text.trim().is_empty() {
                None
            } else {
                Some(Value::String(text))
            }
        }
    }
}

/// String form of a non-blank cell
pub fn cell_text(cell: &Data) -> Option<String> {
    cell_value(cell).map(|v| value_text(&v))
}

/// String form of a row value as used for matching and display
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    fn sample_range() -> Range<Data> {
        // A1:C3 with a blank header in B1
        let mut range = Range::new((0, 0), (2, 2));
        range.set_value((0, 0), text("Screen Label"));
        range.set_value((0, 2), text("Destination"));
        range.set_value((1, 0), text("Daily Limit"));
        range.set_value((1, 1), Data::Float(500.0));
        range.set_value((2, 2), text("   "));
        range
    }

    #[test]
    fn test_columns_are_padded_and_synthesized() {
        let data = SheetData::from_range(&sample_range());
        assert_eq!(
            data.columns,
            vec![
                "Screen Label",
                "Column 2",
                "Destination",
                "Column 4",
                "Column 5",
                "Column 6"
            ]
        );
    }

    #[test]
    fn test_rows_are_padded_with_placeholders() {
        let data = SheetData::from_range(&sample_range());
        // rows 1..=5 (last detected row 2, plus three)
        assert_eq!(data.rows.len(), 5);
        for row in &data.rows {
            assert_eq!(row.len(), data.columns.len());
        }

        let first = &data.rows[0];
        assert_eq!(first["Screen Label"], Value::String("Daily Limit".into()));
        assert_eq!(first["Column 2"], Value::from(500));
        assert_eq!(first["Destination"], Value::String("-".into()));
    }

    #[test]
    fn test_records_ignore_whitespace_only_rows() {
        let data = SheetData::from_range(&sample_range());
        // Row 2 only holds whitespace, padding rows hold nothing
        assert_eq!(data.records, 1);
    }

    #[test]
    fn test_empty_range_yields_minimal_shape() {
        let range: Range<Data> = Range::empty();
        let data = SheetData::from_range(&range);
        assert_eq!(data.columns.len(), 4);
        assert_eq!(data.columns[0], "Column 1");
        assert_eq!(data.rows.len(), 3);
        assert_eq!(data.records, 0);
    }

    #[test]
    fn test_numeric_header_becomes_text() {
        let mut range = Range::new((0, 0), (0, 0));
        range.set_value((0, 0), Data::Int(2024));
        let columns = detect_columns(&range, 0);
        assert_eq!(columns[0], "2024");
    }

    #[test]
    fn test_cell_values() {
        assert_eq!(cell_value(&Data::Empty), None);
        assert_eq!(cell_value(&text("")), None);
        assert_eq!(cell_value(&Data::Float(1.5)), Some(Value::from(1.5)));
        assert_eq!(cell_value(&Data::Bool(true)), Some(Value::Bool(true)));
        assert_eq!(value_text(&Value::from(42)), "42");
    }

    #[test]
    fn test_declared_range_wider_than_data() {
        // Data in A1:A2, sheet declares A1:G6
        let mut range = Range::new((0, 0), (1, 0));
        range.set_value((0, 0), text("Label"));
        range.set_value((1, 0), text("x"));

        let data = SheetData::from_range_within(&range, (5, 6));
        assert_eq!(data.columns.len(), 7 + PADDING as usize);
        assert_eq!(data.columns[9], "Column 10");
        assert_eq!(data.rows.len(), 5 + PADDING as usize);
        assert_eq!(data.records, 1);
    }

    #[test]
    fn test_declared_range_narrower_than_data() {
        // Sheet declares A1:B2 but holds values out to F7
        let mut range = Range::new((0, 0), (6, 5));
        range.set_value((0, 0), text("Label"));
        range.set_value((1, 0), text("inside"));
        range.set_value((3, 0), text("padding row"));
        range.set_value((1, 4), text("padding column"));
        range.set_value((6, 5), text("beyond"));

        let data = SheetData::from_range_within(&range, (1, 1));
        assert_eq!(data.columns.len(), 2 + PADDING as usize);
        assert_eq!(data.rows.len(), 1 + PADDING as usize);
        assert_eq!(data.rows[0]["Column 5"], Value::from("padding column"));
        assert_eq!(data.rows[2]["Label"], Value::from("padding row"));
        // Only the row with a value inside A1:B2 counts
        assert_eq!(data.records, 1);
        assert!(data
            .rows
            .iter()
            .all(|row| row.values().all(|v| v != &Value::from("beyond"))));
    }

    #[test]
    fn test_error_cells_use_excel_text() {
        assert_eq!(
            cell_value(&Data::Error(calamine::CellErrorType::Div0)),
            Some(Value::from("#DIV/0!"))
        );
        assert_eq!(
            cell_value(&Data::Error(calamine::CellErrorType::NA)),
            Some(Value::from("#N/A"))
        );
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let range = sample_range();
        let a = serde_json::to_string(&SheetData::from_range(&range)).unwrap();
        let b = serde_json::to_string(&SheetData::from_range(&range)).unwrap();
        assert_eq!(a, b);
    }
}
