//! DocumentCache - cache-or-fetch over the five catalog documents
//!
//! Each document lives in its own slot with its own fetch timestamp, so one
//! document's freshness never masks another's absence. A slot's async mutex
//! is held across check, fetch and store: concurrent callers for the same
//! document share a single fetch, callers for other documents never wait.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::source::{DataSource, Document, Endpoint, SourceError};

/// Monotonic time source, injectable for tests
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock backed by `Instant::now`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug)]
struct CacheEntry {
    document: Arc<Document>,
    fetched_at: Instant,
    fetched_at_utc: DateTime<Utc>,
}

/// Point-in-time view of one cache slot
#[derive(Debug, Clone, Serialize)]
pub struct SlotStatus {
    pub endpoint: Endpoint,
    pub cached: bool,
    pub fresh: bool,
    pub records: Option<usize>,
    pub age_secs: Option<u64>,
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Cache of fetched catalog documents
pub struct DocumentCache {
    source: Arc<dyn DataSource>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    slots: [Mutex<Option<CacheEntry>>; 5],
}

impl DocumentCache {
    /// Create a cache using the system clock
    pub fn new(source: Arc<dyn DataSource>, ttl: Duration) -> Self {
        Self::with_clock(source, ttl, Arc::new(SystemClock))
    }

    /// Create a cache with an explicit clock
    pub fn with_clock(source: Arc<dyn DataSource>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        debug!(?ttl, "DocumentCache::with_clock: called");
        Self {
            source,
            clock,
            ttl,
            slots: std::array::from_fn(|_| Mutex::new(None)),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn slot(&self, endpoint: Endpoint) -> &Mutex<Option<CacheEntry>> {
        &self.slots[endpoint.index()]
    }

    fn is_fresh(&self, entry: &CacheEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.fetched_at) < self.ttl
    }

    /// Return the cached document if fresh, otherwise refetch
    ///
    /// A failed refetch falls back to the cached copy however stale it is;
    /// the error is only returned when nothing was ever cached.
    pub async fn get_or_fetch(&self, endpoint: Endpoint) -> Result<Arc<Document>, SourceError> {
        debug!(%endpoint, "get_or_fetch: called");
        let mut slot = self.slot(endpoint).lock().await;

        if let Some(entry) = slot.as_ref()
            && self.is_fresh(entry, self.clock.now())
        {
            debug!(%endpoint, "get_or_fetch: cache hit");
            return Ok(entry.document.clone());
        }

        let fetched = self.source.fetch(endpoint).await.and_then(|document| {
            if document.endpoint() == endpoint {
                Ok(document)
            } else {
                Err(SourceError::WrongDocument {
                    expected: endpoint,
                    actual: document.endpoint(),
                })
            }
        });

        match fetched {
            Ok(document) => {
                let document = Arc::new(document);
                info!(%endpoint, records = document.len(), "get_or_fetch: cached fresh document");
                *slot = Some(CacheEntry {
                    document: document.clone(),
                    fetched_at: self.clock.now(),
                    fetched_at_utc: Utc::now(),
                });
                Ok(document)
            }
            Err(e) => match slot.as_ref() {
                Some(entry) => {
                    warn!(%endpoint, error = %e, "get_or_fetch: refetch failed, serving stale document");
                    Ok(entry.document.clone())
                }
                None => {
                    warn!(%endpoint, error = %e, "get_or_fetch: fetch failed with nothing cached");
                    Err(e)
                }
            },
        }
    }

    /// Drop one cached document
    pub async fn invalidate(&self, endpoint: Endpoint) {
        debug!(%endpoint, "invalidate: called");
        *self.slot(endpoint).lock().await = None;
    }

    /// Drop every cached document
    pub async fn invalidate_all(&self) {
        for endpoint in Endpoint::ALL {
            self.invalidate(endpoint).await;
        }
    }

    /// Report presence, size and age of every slot
    pub async fn status(&self) -> Vec<SlotStatus> {
        let now = self.clock.now();
        let mut statuses = Vec::with_capacity(Endpoint::ALL.len());
        for endpoint in Endpoint::ALL {
            let slot = self.slot(endpoint).lock().await;
            statuses.push(match slot.as_ref() {
                Some(entry) => SlotStatus {
                    endpoint,
                    cached: true,
                    fresh: self.is_fresh(entry, now),
                    records: Some(entry.document.len()),
                    age_secs: Some(now.saturating_duration_since(entry.fetched_at).as_secs()),
                    fetched_at: Some(entry.fetched_at_utc),
                },
                None => SlotStatus {
                    endpoint,
                    cached: false,
                    fresh: false,
                    records: None,
                    age_secs: None,
                    fetched_at: None,
                },
            });
        }
        statuses
    }
}
