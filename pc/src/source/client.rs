//! DataSource trait definition

use async_trait::async_trait;

use super::{Document, Endpoint, SourceError};

/// Stateless document provider - each call is an independent fetch
///
/// Implementations do not retry and keep no state between calls. Freshness,
/// reuse and stale fallback are decided by the catalog cache.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch and parse one catalog document
    async fn fetch(&self, endpoint: Endpoint) -> Result<Document, SourceError>;
}
