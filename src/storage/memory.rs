//! In-memory store
//!
//! Holds the base table and serves the `(pk, goals)` index on the fly.
//! Query semantics follow the real store closely: the limit bounds the
//! number of key-condition matches evaluated, the filter runs afterwards,
//! and a last-evaluated key is returned only when more matches remain.

use super::types::{QueryPage, QueryRequest, StorageClient};
use crate::error::{Error, Result};
use crate::keys::{build_resume_key, IndexKind};
use crate::query::QueryPlan;
use crate::types::{Key, Record, GOALS, PK, SK};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::{Mutex, RwLock};

/// Position of a record in index order: `(pk, goals, sk)`
///
/// Base-table positions use `0` for goals, which reduces to `(pk, sk)`.
type Position = (String, i64, String);

/// A query as it reached the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedQuery {
    /// Index the query ran against
    pub index: IndexKind,
    /// Request parameters
    pub request: QueryRequest,
}

/// In-memory [`StorageClient`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Base table keyed by `(pk, sk)`
    table: RwLock<BTreeMap<(String, String), Record>>,
    /// Every query received, in order
    queries: Mutex<Vec<RecordedQuery>>,
    /// Successful queries left before injected failures start
    failure_countdown: Mutex<Option<usize>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with records
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        let table = records
            .into_iter()
            .map(|r| ((r.partition_key.clone(), r.sort_key.clone()), r))
            .collect();
        Self {
            table: RwLock::new(table),
            ..Self::default()
        }
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.table.read().await.len()
    }

    /// Whether the table is empty
    pub async fn is_empty(&self) -> bool {
        self.table.read().await.is_empty()
    }

    /// Queries received so far
    pub async fn recorded_queries(&self) -> Vec<RecordedQuery> {
        self.queries.lock().await.clone()
    }

    /// Let `successes` more queries through, then fail every query
    pub async fn fail_queries_after(&self, successes: usize) {
        *self.failure_countdown.lock().await = Some(successes);
    }

    /// Stop injecting failures
    pub async fn clear_failures(&self) {
        *self.failure_countdown.lock().await = None;
    }

    async fn check_injected_failure(&self) -> Result<()> {
        let mut countdown = self.failure_countdown.lock().await;
        match countdown.as_mut() {
            Some(0) => Err(Error::store("query", "injected failure")),
            Some(left) => {
                *left -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

fn position(record: &Record, index: IndexKind) -> Position {
    let goals = match index {
        IndexKind::Primary => 0,
        IndexKind::Goals => i64::from(record.goals),
    };
    (record.partition_key.clone(), goals, record.sort_key.clone())
}

fn string_attribute<'a>(key: &'a Key, name: &str) -> Result<&'a str> {
    key.get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| Error::store("query", format!("start key attribute '{name}' must be a string")))
}

fn start_position(key: &Key, index: IndexKind) -> Result<Position> {
    let expected = index.key_attributes();
    if key.len() != expected.len() || expected.iter().any(|name| !key.contains_key(*name)) {
        return Err(Error::store(
            "query",
            format!(
                "exclusive start key {:?} does not match the {index:?} index key {expected:?}",
                key.keys().collect::<Vec<_>>()
            ),
        ));
    }

    let goals = match index {
        IndexKind::Primary => 0,
        IndexKind::Goals => key
            .get(GOALS)
            .and_then(|v| v.as_i64())
            .ok_or_else(|| Error::store("query", "start key attribute 'goals' must be a number"))?,
    };
    Ok((
        string_attribute(key, PK)?.to_string(),
        goals,
        string_attribute(key, SK)?.to_string(),
    ))
}

#[async_trait]
impl StorageClient for MemoryStore {
    async fn scan(&self, limit: u32) -> Result<Vec<Record>> {
        let table = self.table.read().await;
        Ok(table.values().take(limit as usize).cloned().collect())
    }

    async fn get_item(&self, key: &Key) -> Result<Option<Record>> {
        let pk = key
            .get(PK)
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::store("get_item", "key is missing 'pk'"))?;
        let sk = key
            .get(SK)
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::store("get_item", "key is missing 'sk'"))?;

        let table = self.table.read().await;
        Ok(table.get(&(pk.to_string(), sk.to_string())).cloned())
    }

    async fn put_item(&self, record: &Record) -> Result<()> {
        let mut table = self.table.write().await;
        table.insert(
            (record.partition_key.clone(), record.sort_key.clone()),
            record.clone(),
        );
        Ok(())
    }

    async fn query(&self, plan: &QueryPlan, request: &QueryRequest) -> Result<QueryPage> {
        self.queries.lock().await.push(RecordedQuery {
            index: plan.index(),
            request: request.clone(),
        });
        self.check_injected_failure().await?;

        if request.limit == Some(0) {
            return Err(Error::store("query", "limit must be at least 1"));
        }

        let index = plan.index();
        let table = self.table.read().await;
        let mut candidates: Vec<(Position, &Record)> = table
            .values()
            .filter(|r| plan.matches_key(r))
            .map(|r| (position(r, index), r))
            .collect();
        candidates.sort_by(|a, b| a.0.cmp(&b.0));
        if request.scan_descending {
            candidates.reverse();
        }

        let start = match &request.exclusive_start_key {
            Some(key) => {
                let after = start_position(key, index)?;
                candidates
                    .iter()
                    .position(|(p, _)| {
                        if request.scan_descending {
                            *p < after
                        } else {
                            *p > after
                        }
                    })
                    .unwrap_or(candidates.len())
            }
            None => 0,
        };

        let remaining = &candidates[start..];
        let take = request
            .limit
            .map_or(remaining.len(), |limit| (limit as usize).min(remaining.len()));
        let window = &remaining[..take];

        let items: Vec<Record> = window
            .iter()
            .filter(|(_, r)| plan.matches_filter(r))
            .map(|(_, r)| (*r).clone())
            .collect();

        let last_evaluated_key = if take < remaining.len() {
            window.last().map(|(_, r)| build_resume_key(r, index))
        } else {
            None
        };

        tracing::debug!(
            index = ?index,
            scanned = window.len(),
            matched = items.len(),
            more = last_evaluated_key.is_some(),
            "memory query"
        );

        Ok(QueryPage {
            matched_count: items.len(),
            scanned_count: window.len(),
            items,
            last_evaluated_key,
        })
    }
}
