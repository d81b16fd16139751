//! Tool layer over the catalog
//!
//! Each catalog operation is exposed as a named [`Tool`] with a JSON Schema
//! for its arguments. The [`ToolExecutor`] routes calls by name; results are
//! pretty-printed JSON text, failures are flagged error results.

pub mod args;
mod context;
mod executor;
mod traits;

pub mod builtin;

pub use context::ToolContext;
pub use executor::{ToolCall, ToolExecutor};
pub use traits::{Tool, ToolDefinition, ToolResult};
