//! Completion API access for the Answer Service

pub mod client;

pub use client::{CompletionBackend, CompletionClient};
