//! ToolContext - execution context for tools

use std::sync::Arc;

use tracing::debug;

use crate::catalog::Catalog;

/// Shared state handed to every tool call
///
/// Cloning is cheap; all clones share one catalog and therefore one cache.
#[derive(Clone)]
pub struct ToolContext {
    pub catalog: Arc<Catalog>,
}

impl ToolContext {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        debug!("ToolContext::new: called");
        Self { catalog }
    }
}
