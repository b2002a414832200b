//! Listing service

use crate::error::Result;
use crate::keys::build_key;
use crate::pagination::{Cursor, PageAccumulator};
use crate::query::{self, QueryPlan};
use crate::storage::{QueryRequest, StorageClient};
use crate::types::Record;
use std::sync::Arc;

/// Player statistics operations over a storage client
#[derive(Clone)]
pub struct PlayerStats {
    store: Arc<dyn StorageClient>,
}

impl PlayerStats {
    /// Create the service
    pub fn new(store: Arc<dyn StorageClient>) -> Self {
        Self { store }
    }

    /// Underlying store
    pub fn store(&self) -> &dyn StorageClient {
        self.store.as_ref()
    }

    fn accumulator(&self) -> PageAccumulator<'_> {
        PageAccumulator::new(self.store.as_ref())
    }

    /// Bounded read of the whole table, used for existence checks
    pub async fn scan_stats_table(&self, page_limit: u32) -> Result<Vec<Record>> {
        self.store.scan(page_limit).await
    }

    /// Point lookup; `Ok(None)` when the player is not stored
    pub async fn get_player_stats(
        &self,
        country: &str,
        national_team: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Record>> {
        let key = build_key(country, national_team, first_name, last_name);
        self.store.get_item(&key).await
    }

    /// Upsert one record
    pub async fn put_player_stats(&self, record: &Record) -> Result<()> {
        self.store.put_item(record).await
    }

    /// One unbounded store page of a team, no continuation
    pub async fn list_players(&self, country: &str, national_team: &str) -> Result<Vec<Record>> {
        let plan = query::team_listing(country, national_team)?;
        let page = self.store.query(&plan, &QueryRequest::new()).await?;
        Ok(page.items)
    }

    /// Every player of a team, following store pages to the end
    pub async fn list_all_players(&self, country: &str, national_team: &str) -> Result<Vec<Record>> {
        let plan = query::team_listing(country, national_team)?;
        self.drain(&plan).await
    }

    /// One bounded page of a team; the cursor carries the store's key
    pub async fn list_limited_players(
        &self,
        country: &str,
        national_team: &str,
        cursor: &Cursor,
    ) -> Result<(Vec<Record>, Cursor)> {
        let plan = query::team_listing(country, national_team)?;
        self.accumulator().fetch_once(&plan, cursor).await
    }

    /// A page of a team's players with at least `goal_threshold` goals
    pub async fn list_players_by_goals_threshold(
        &self,
        country: &str,
        national_team: &str,
        goal_threshold: u32,
        cursor: &Cursor,
    ) -> Result<(Vec<Record>, Cursor)> {
        let plan = query::team_listing_with_goal_filter(country, national_team, goal_threshold)?;
        self.accumulator().advance(&plan, cursor).await
    }

    /// Like [`Self::list_players_by_goals_threshold`], ordered by goals
    pub async fn list_players_by_goals_threshold_sorted(
        &self,
        country: &str,
        national_team: &str,
        goal_threshold: u32,
        cursor: &Cursor,
    ) -> Result<(Vec<Record>, Cursor)> {
        let plan = query::team_listing_by_goals(country, national_team, goal_threshold)?;
        self.accumulator().advance(&plan, cursor).await
    }

    async fn drain(&self, plan: &QueryPlan) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        let mut request = QueryRequest::new();
        loop {
            let page = self.store.query(plan, &request).await?;
            records.extend(page.items);
            match page.last_evaluated_key {
                Some(key) => request.exclusive_start_key = Some(key),
                None => break,
            }
        }
        Ok(records)
    }
}
