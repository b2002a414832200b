//! Page accumulation

use super::types::Cursor;
use crate::error::Result;
use crate::keys::build_resume_key;
use crate::query::QueryPlan;
use crate::storage::{QueryRequest, StorageClient};
use crate::types::Record;

/// Drives store queries until a client page is full
///
/// Holds no state between calls: every call takes a cursor and returns a
/// new one. On error nothing is returned and the caller's cursor is still
/// valid for a retry.
#[derive(Clone, Copy)]
pub struct PageAccumulator<'a> {
    store: &'a dyn StorageClient,
}

impl<'a> PageAccumulator<'a> {
    /// Create an accumulator over a store
    pub fn new(store: &'a dyn StorageClient) -> Self {
        Self { store }
    }

    /// Return up to `cursor.page_limit` filtered records and the next cursor
    ///
    /// Fewer records come back only when the partition runs out, in which
    /// case the returned cursor has no resume key.
    pub async fn advance(&self, plan: &QueryPlan, cursor: &Cursor) -> Result<(Vec<Record>, Cursor)> {
        cursor.validate()?;

        // The limit is caller input; grow with what the store returns.
        let budget = cursor.page_limit as usize;
        let mut collected: Vec<Record> = Vec::new();
        let mut request = QueryRequest::new()
            .with_limit(cursor.page_limit)
            .with_start_key(cursor.last_evaluated_key.clone())
            .descending(cursor.scan_descending);
        let mut fetched = 0usize;

        let resume_key = loop {
            let page = self.store.query(plan, &request).await?;
            fetched += 1;

            let pending = budget - collected.len();
            let matched = page.matched_count.min(page.items.len());
            tracing::debug!(
                page = fetched,
                matched,
                scanned = page.scanned_count,
                pending,
                "fetched underlying page"
            );

            if matched >= pending {
                // Cutting at the very end of the final store page leaves nothing to resume.
                let exhausted = pending == page.items.len() && !page.has_more();
                let mut items = page.items;
                items.truncate(pending);
                let resume_key = match items.last() {
                    Some(boundary) if !exhausted => Some(build_resume_key(boundary, plan.index())),
                    _ => None,
                };
                collected.extend(items);
                break resume_key;
            }

            collected.extend(page.items);
            match page.last_evaluated_key {
                Some(key) => request.exclusive_start_key = Some(key),
                None => break None,
            }
        };

        tracing::debug!(
            records = collected.len(),
            store_pages = fetched,
            more = resume_key.is_some(),
            "accumulated page"
        );
        Ok((collected, cursor.resume_at(resume_key)))
    }

    /// Fetch exactly one bounded store page
    ///
    /// For plans without a filter, where one store page already is a client
    /// page. The returned cursor carries the store's own last-evaluated key.
    pub async fn fetch_once(&self, plan: &QueryPlan, cursor: &Cursor) -> Result<(Vec<Record>, Cursor)> {
        cursor.validate()?;

        let request = QueryRequest::new()
            .with_limit(cursor.page_limit)
            .with_start_key(cursor.last_evaluated_key.clone())
            .descending(cursor.scan_descending);
        let page = self.store.query(plan, &request).await?;
        Ok((page.items, cursor.resume_at(page.last_evaluated_key)))
    }
}
