//! Storage trait and page types

use crate::error::Result;
use crate::query::QueryPlan;
use crate::types::{Key, Record};
use async_trait::async_trait;

/// Parameters of one bounded, resumable query request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryRequest {
    /// Maximum number of key-condition matches to evaluate (before filtering)
    pub limit: Option<u32>,
    /// Resume strictly after this key
    pub exclusive_start_key: Option<Key>,
    /// Walk the index in descending order
    pub scan_descending: bool,
}

impl QueryRequest {
    /// Unbounded request from the start of the partition
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the request
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Resume after a key
    #[must_use]
    pub fn with_start_key(mut self, key: Option<Key>) -> Self {
        self.exclusive_start_key = key;
        self
    }

    /// Set the scan direction
    #[must_use]
    pub fn descending(mut self, scan_descending: bool) -> Self {
        self.scan_descending = scan_descending;
        self
    }
}

/// One page returned by the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPage {
    /// Items that survived the filter, in index order
    pub items: Vec<Record>,
    /// Number of items that satisfied the filter
    pub matched_count: usize,
    /// Number of key-condition matches evaluated before filtering
    pub scanned_count: usize,
    /// Key of the last evaluated item; `None` once the query is exhausted
    pub last_evaluated_key: Option<Key>,
}

impl QueryPage {
    /// Whether the store has more pages after this one
    pub fn has_more(&self) -> bool {
        self.last_evaluated_key.is_some()
    }
}

/// Capabilities required from the underlying data store
///
/// Implementations perform no retries of their own beyond what the driver
/// does; every failure is reported as-is.
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Unfiltered bounded read of the whole table
    async fn scan(&self, limit: u32) -> Result<Vec<Record>>;

    /// Point lookup; `Ok(None)` when no item has this key
    async fn get_item(&self, key: &Key) -> Result<Option<Record>>;

    /// Unconditional upsert
    async fn put_item(&self, record: &Record) -> Result<()>;

    /// Bounded, resumable, direction-aware range read
    async fn query(&self, plan: &QueryPlan, request: &QueryRequest) -> Result<QueryPage>;
}
