//! Prompt assembly for workbook questions
//!
//! Message order is fixed: formatting instructions, then the candidate
//! context, then the caller's conversation.

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::search::Candidate;
use crate::types::messages::conversational;
use crate::types::{ChatMessage, ChatRole};

/// Output-format contract given to the model
pub const SYSTEM_PROMPT: &str = r#"You are an AI assistant helping a user find fields in Excel configuration workbooks.

Follow these strict rules when responding:
- If exactly one strong match: respond exactly as:
Here's what you might be looking for:
Workbook: (which workbook)
Title: (sheet name)
Label: (label)
Description: (description)

- If two or more plausible matches: respond exactly as:
I found **N results** that match what you are looking for:
1. Workbook: (which workbook)
   Title: (sheet name)
   Label: (label)
   Description: (description)
2. ...

Additional constraints:
- Replace N with the number of results shown (e.g., 3) and bold only the phrase "N results" (e.g., **3 results**).
- Use only items present in the "Top matches" context, in the same order; do not invent values.
- List up to the items provided in context; do not include destination.
- Remove exact duplicates (same workbook+title+label+description).
- Do not repeat any header per item; no extra commentary before or after.
- If zero plausible matches, ask a brief clarifying question instead.
- Prefer matches where query terms appear in the label or the additional field description."#;

/// First line of the context message
pub const CONTEXT_HEADER: &str = "Top matches (pre-filtered context). Use for reference only. Each item: {workbook, title, label, description, destination}.";

/// Message as sent to the completion API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: ChatRole,
    pub content: String,
}

impl From<ChatMessage> for PromptMessage {
    fn from(msg: ChatMessage) -> Self {
        Self {
            role: msg.role,
            content: msg.content,
        }
    }
}

/// Numbered, one JSON object per line
pub fn context_block(candidates: &[Candidate]) -> Result<String> {
    let mut lines = Vec::with_capacity(candidates.len() + 1);
    lines.push(CONTEXT_HEADER.to_string());
    for (i, candidate) in candidates.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, serde_json::to_string(candidate)?));
    }
    Ok(lines.join("\n"))
}

/// Assemble the full message list for one question
pub fn build_messages(
    candidates: &[Candidate],
    history: Vec<ChatMessage>,
) -> Result<Vec<PromptMessage>> {
    let mut messages = vec![
        PromptMessage {
            role: ChatRole::System,
            content: SYSTEM_PROMPT.to_string(),
        },
        PromptMessage {
            role: ChatRole::System,
            content: context_block(candidates)?,
        },
    ];
    messages.extend(conversational(history).into_iter().map(PromptMessage::from));
    Ok(messages)
}
