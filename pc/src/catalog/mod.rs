//! Query cache and filter engine
//!
//! [`DocumentCache`] decides when a fetched document may be reused;
//! [`Catalog`] serves search, lookup, grouping, ranking and sampling over the
//! cached collections.

pub mod cache;
mod engine;
mod error;
pub mod filter;
mod types;

pub use cache::{Clock, DocumentCache, SlotStatus, SystemClock};
pub use engine::Catalog;
pub use error::CatalogError;
pub use types::{PackSection, PackView, RandomQuery, SearchQuery, SearchResults};

pub const DEFAULT_SEARCH_LIMIT: usize = 10;
pub const MAX_SEARCH_LIMIT: usize = 50;

pub const DEFAULT_TAG_LIMIT: usize = 50;
pub const MAX_TAG_LIMIT: usize = 200;

pub const DEFAULT_PERSONA_LIMIT: usize = 50;
pub const MAX_PERSONA_LIMIT: usize = 500;

pub const DEFAULT_RANDOM_COUNT: usize = 5;
pub const MAX_RANDOM_COUNT: usize = 10;
