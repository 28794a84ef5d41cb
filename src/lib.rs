//! bconfig - Product configuration dashboard
//!
//! Serves three product workbooks (Business Checking, Consumer Checking,
//! Consumer Savings) over a small JSON API and answers free-text questions
//! about them with one chat-completion call grounded on retrieved rows.
//!
//! # Architecture
//!
//! - **workbook**: xlsx loading, padded sheet projection, sheet index
//! - **search**: column resolution, row scoring, candidate aggregation
//! - **prompt**: system prompt and context assembly
//! - **completion**: chat-completion client
//! - **answer**: search + prompt + completion for one question
//! - **server**: axum routes for `/ai`, `/index`, `/sheet`, `/filter`

pub mod answer;
pub mod cli;
pub mod completion;
pub mod config;
pub mod doctor;
pub mod errors;
pub mod prompt;
pub mod search;
pub mod server;
pub mod types;
pub mod workbook;

// Re-export commonly used types
pub use config::Config;
pub use errors::{DashboardError, Result};
