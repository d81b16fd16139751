//! promptcatalog - cached query layer over a remote prompt catalog
//!
//! The catalog lives behind five JSON documents (prompts, categories, packs,
//! tags, personas) served by a remote HTTP endpoint. This crate fetches them
//! lazily, keeps each one fresh for a configurable TTL, falls back to stale
//! copies when the remote is unavailable, and answers search, lookup,
//! grouping, ranking and sampling queries over them.
//!
//! # Architecture
//!
//! ```text
//! source   - DataSource trait, HTTP client, record types
//! catalog  - DocumentCache (TTL, single flight, stale fallback) + Catalog queries
//! tools    - named tools with JSON Schema inputs over the catalog
//! server   - line-delimited JSON-RPC over stdio
//! ```
//!
//! # Example
//!
//! ```ignore
//! use promptcatalog::{Catalog, Config, SearchQuery};
//!
//! let config = Config::load(None)?;
//! let catalog = Catalog::from_config(&config)?;
//! let results = catalog
//!     .search(&SearchQuery {
//!         query: Some("email".into()),
//!         ..Default::default()
//!     })
//!     .await?;
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod render;
pub mod server;
pub mod source;
pub mod tools;

pub use catalog::{Catalog, CatalogError, DocumentCache, PackView, RandomQuery, SearchQuery, SearchResults};
pub use config::Config;
pub use source::{Category, DataSource, Document, Endpoint, Pack, Persona, Prompt, SourceError, Tag};
pub use tools::{ToolContext, ToolExecutor};

/// Default freshness window for cached documents (5 minutes)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
