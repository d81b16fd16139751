//! Data source client for the remote prompt catalog
//!
//! Fetches one of the five catalog documents and parses it into typed
//! records. Stateless: reuse, freshness and stale fallback belong to the
//! catalog cache.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod http;
mod types;

pub use client::DataSource;
pub use error::SourceError;
pub use http::HttpDataSource;
pub use types::{Category, Document, Endpoint, Pack, Persona, Prompt, RecordId, Tag};

use crate::config::ApiConfig;

/// Create the HTTP data source described by the config
pub fn create_source(config: &ApiConfig) -> Result<Arc<dyn DataSource>, SourceError> {
    debug!(base_url = %config.base_url, "create_source: called");
    Ok(Arc::new(HttpDataSource::from_config(config)?))
}
