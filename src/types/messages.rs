//! Chat message types
//!
//! Conversation history arrives from the caller on every request; nothing
//! is remembered between calls.

use serde::{Deserialize, Serialize};

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
    /// Any role string we don't forward
    #[serde(other)]
    Other,
}

impl ChatRole {
    /// Roles that callers may place in the conversation history
    pub fn is_conversational(&self) -> bool {
        matches!(self, ChatRole::User | ChatRole::Assistant)
    }
}

/// A single message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    #[serde(default)]
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Keep only user/assistant messages, in order
pub fn conversational(messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
    messages
        .into_iter()
        .filter(|m| m.role.is_conversational())
        .collect()
}

/// The search query: the latest user message, case-folded and trimmed.
/// Empty when the history holds no user message.
pub fn latest_user_query(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .rev()
        .find(|m| m.role == ChatRole::User)
        .map(|m| m.content.to_lowercase().trim().to_string())
        .unwrap_or_default()
}
