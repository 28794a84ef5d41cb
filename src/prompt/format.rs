//! Classification of assistant replies against the output contract
//!
//! Replies are never rewritten; the verdict is reported next to the
//! answer so callers can see when the model ignored the format.

use serde::{Deserialize, Serialize};

const FIELD_PREFIXES: [&str; 4] = ["Workbook:", "Title:", "Label:", "Description:"];

/// Which of the contract's shapes a reply follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerFormat {
    /// Four labeled lines for one match
    Single,
    /// Bold count header plus a numbered list of `count` items
    Multiple { count: usize },
    /// A short question back to the user
    Clarify,
    /// None of the above
    Unknown,
}

impl AnswerFormat {
    pub fn name(&self) -> &'static str {
        match self {
            AnswerFormat::Single => "single",
            AnswerFormat::Multiple { .. } => "multiple",
            AnswerFormat::Clarify => "clarify",
            AnswerFormat::Unknown => "unknown",
        }
    }
}

/// `N` from `I found **N results** that match...`
fn header_count(line: &str) -> Option<usize> {
    let rest = line.trim().strip_prefix("I found **")?;
    let (count, rest) = rest.split_once(" results**")?;
    if !rest.trim_start().starts_with("that match") {
        return None;
    }
    count.parse().ok()
}

/// Line opens a numbered item, e.g. `2. Workbook: ...`
fn is_numbered_item(line: &str) -> bool {
    let line = line.trim_start();
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && line[digits..].starts_with(". Workbook:")
}

fn has_field(line: &str) -> bool {
    let line = line.trim_start();
    FIELD_PREFIXES.iter().any(|p| line.starts_with(p))
}

/// Classify a reply
pub fn validate_answer(text: &str) -> AnswerFormat {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();

    let items = lines.iter().filter(|l| is_numbered_item(l)).count();
    if let Some(count) = lines.first().and_then(|l| header_count(l)) {
        if count == items && count > 0 {
            return AnswerFormat::Multiple { count };
        }
        return AnswerFormat::Unknown;
    }

    if items == 0 {
        let all_fields = FIELD_PREFIXES
            .iter()
            .all(|p| lines.iter().any(|l| l.trim_start().starts_with(p)));
        if all_fields {
            return AnswerFormat::Single;
        }
        if !lines.iter().any(|l| has_field(l)) && text.trim_end().ends_with('?') {
            return AnswerFormat::Clarify;
        }
    }

    AnswerFormat::Unknown
}
