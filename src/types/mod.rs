//! Type definitions module
//!
//! Products, scopes and chat messages shared by the search, prompt and
//! server layers.

pub mod messages;
pub mod product;

// Re-export commonly used types
pub use messages::{ChatMessage, ChatRole};
pub use product::{ProductScope, ProductType};
