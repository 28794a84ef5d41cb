//! Column Resolver: semantic field to physical column
//!
//! Headers differ between workbooks and sheets, so each field is looked up
//! through a list of preferred header names.

/// Header names for the label field, most preferred first
pub const LABEL_COLUMNS: &[&str] = &["Screen Label", "Label"];

/// Header names for the description field
pub const DESCRIPTION_COLUMNS: &[&str] = &[
    "Additional Field Description",
    "Description",
    "Field Description",
];

/// Header names for the destination field
pub const DESTINATION_COLUMNS: &[&str] = &["Destination", "Screen Destination"];

/// Pick the column best matching `candidates`.
///
/// Every exact (trimmed, case-insensitive) match across all candidates is
/// tried before any substring match; within a pass candidates are tried in
/// order and the first matching column wins.
pub fn pick_column<'a>(columns: &'a [String], candidates: &[&str]) -> Option<&'a str> {
    let lowered: Vec<String> = columns.iter().map(|c| c.trim().to_lowercase()).collect();

    for candidate in candidates {
        let target = candidate.to_lowercase();
        if let Some(i) = lowered.iter().position(|c| *c == target) {
            return Some(columns[i].as_str());
        }
    }

    for candidate in candidates {
        let target = candidate.to_lowercase();
        if let Some(i) = lowered.iter().position(|c| c.contains(&target)) {
            return Some(columns[i].as_str());
        }
    }

    None
}

/// Resolved label/description/destination columns of one sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldColumns {
    pub label: Option<String>,
    pub description: Option<String>,
    pub destination: Option<String>,
}

impl FieldColumns {
    pub fn resolve(columns: &[String]) -> Self {
        Self {
            label: pick_column(columns, LABEL_COLUMNS).map(str::to_string),
            description: pick_column(columns, DESCRIPTION_COLUMNS).map(str::to_string),
            destination: pick_column(columns, DESTINATION_COLUMNS).map(str::to_string),
        }
    }
}
