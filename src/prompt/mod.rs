//! Prompt Builder and reply format checks

pub mod builder;
pub mod format;

pub use builder::{build_messages, context_block, PromptMessage, SYSTEM_PROMPT};
pub use format::{validate_answer, AnswerFormat};
