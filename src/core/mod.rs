// Public modules
pub mod component;
pub mod error;
pub mod rewrite;
pub mod story;
pub mod tree;
pub mod workspace;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
