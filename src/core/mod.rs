pub mod config;

// Internal modules - exposed through the api module
pub(crate) mod discovery;
pub(crate) mod pipeline;
pub(crate) mod progress;
pub(crate) mod queue;
pub(crate) mod results;

// Public API - curated exports only
pub mod api;

// Re-export key items at module level for convenience
pub use api::*;
