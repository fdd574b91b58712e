pub mod error;
pub mod operations;
pub mod parse;

// Public API - curated exports only
pub mod api;

// Re-export commonly used items
pub use api::*;
