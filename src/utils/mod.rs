//! Generic utility primitives with zero domain knowledge.
//!
//! - `io` - File I/O with consistent error handling
//! - `path` - `/`-separated virtual path arithmetic
//! - `template` - `{{key}}` template rendering
//! - `validation` - Input validation helpers

pub mod io;
pub mod path;
pub(crate) mod template;
pub mod validation;
