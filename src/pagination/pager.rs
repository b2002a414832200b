//! Iterating over a whole paging sequence

use super::accumulator::PageAccumulator;
use super::types::Cursor;
use crate::error::Result;
use crate::query::QueryPlan;
use crate::storage::StorageClient;
use crate::types::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Accumulate,
    Single,
}

/// Repeatedly advances a cursor until the sequence is finished
///
/// The first call always fetches, even though a fresh cursor has no resume
/// key; every later call stops once the previous one returned no key.
pub struct Pager<'a> {
    accumulator: PageAccumulator<'a>,
    plan: QueryPlan,
    cursor: Cursor,
    step: Step,
    started: bool,
}

impl<'a> Pager<'a> {
    /// Page through `plan` with accumulation
    pub fn new(store: &'a dyn StorageClient, plan: QueryPlan, cursor: Cursor) -> Self {
        Self {
            accumulator: PageAccumulator::new(store),
            plan,
            cursor,
            step: Step::Accumulate,
            started: false,
        }
    }

    /// Page through `plan` one store page at a time
    pub fn single(store: &'a dyn StorageClient, plan: QueryPlan, cursor: Cursor) -> Self {
        Self {
            step: Step::Single,
            ..Self::new(store, plan, cursor)
        }
    }

    /// Cursor as of the last returned page
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Whether the sequence is finished
    pub fn is_done(&self) -> bool {
        self.started && !self.cursor.has_resume_key()
    }

    /// Next page, or `None` once the sequence is finished
    pub async fn next_page(&mut self) -> Result<Option<Vec<Record>>> {
        if self.is_done() {
            return Ok(None);
        }

        let (records, cursor) = match self.step {
            Step::Accumulate => self.accumulator.advance(&self.plan, &self.cursor).await?,
            Step::Single => self.accumulator.fetch_once(&self.plan, &self.cursor).await?,
        };
        self.cursor = cursor;
        self.started = true;
        Ok(Some(records))
    }

    /// Drain the remaining pages
    pub async fn collect_pages(mut self) -> Result<Vec<Vec<Record>>> {
        let mut pages = Vec::new();
        while let Some(page) = self.next_page().await? {
            pages.push(page);
        }
        Ok(pages)
    }
}
