use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, PoisonError, RwLock,
};
use tracing::debug;

use crate::process::Row;

/// Request id handed out for one ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// The current closure rows, replaced wholesale by each ingestion.
///
/// Readers get an `Arc` to a complete collection; a swap never exposes a
/// partially built one. Only the most recently issued ticket may swap, so a
/// slow fetch finishing after a newer one cannot clobber it.
pub struct RowStore {
    rows: RwLock<Arc<Vec<Row>>>,
    issued: AtomicU64,
}

impl Default for RowStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RowStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Arc::new(Vec::new())),
            issued: AtomicU64::new(0),
        }
    }

    /// Issue the next ticket; it supersedes every earlier one.
    pub fn begin_fetch(&self) -> FetchTicket {
        FetchTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Most recently issued ticket id (0 before any fetch).
    pub fn latest_ticket(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// Install `rows` if `ticket` is still the latest. Returns whether it was.
    pub fn commit(&self, ticket: FetchTicket, rows: Vec<Row>) -> bool {
        self.swap(ticket, Arc::new(rows))
    }

    /// Empty the store if `ticket` is still the latest. Returns whether it was.
    pub fn reset(&self, ticket: FetchTicket) -> bool {
        self.swap(ticket, Arc::new(Vec::new()))
    }

    fn swap(&self, ticket: FetchTicket, rows: Arc<Vec<Row>>) -> bool {
        let mut guard = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        // checked under the write lock so a concurrent swap sees a consistent latest
        let latest = self.latest_ticket();
        if ticket.0 != latest {
            debug!(ticket = ticket.0, latest, "discarding stale result");
            return false;
        }
        *guard = rows;
        true
    }

    /// The current collection.
    pub fn snapshot(&self) -> Arc<Vec<Row>> {
        let guard = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
