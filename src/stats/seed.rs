//! Demonstration seed data

use super::service::PlayerStats;
use crate::error::Result;
use crate::types::Record;

/// What [`insert_seed_data`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The table already held items; nothing written
    AlreadyPopulated,
    /// This many records were written
    Inserted(usize),
}

/// The six demonstration players
pub fn seed_records() -> Vec<Record> {
    vec![
        Record::new("Portugal", "MNT", "Cristiano", "Ronaldo", 118, 43, 196),
        Record::new("Argentina", "MNT", "Lionel", "Messi", 98, 55, 172),
        Record::new("India", "MNT", "Sunil", "Chhetri", 84, 11, 131),
        Record::new("USA", "WNT", "Megan", "Rapinoe", 63, 73, 197),
        Record::new("USA", "WNT", "Alex", "Morgan", 119, 47, 200),
        Record::new("Egypt", "MNT", "Mohamed", "Salah", 47, 26, 85),
    ]
}

/// Write the seed records unless the table already holds something
pub async fn insert_seed_data(stats: &PlayerStats) -> Result<SeedOutcome> {
    if !stats.scan_stats_table(1).await?.is_empty() {
        tracing::warn!("Not inserting seed data, stats table already contains items");
        return Ok(SeedOutcome::AlreadyPopulated);
    }

    let records = seed_records();
    for record in &records {
        stats.put_player_stats(record).await?;
    }
    tracing::info!(count = records.len(), "Loaded stats table with seed data");
    Ok(SeedOutcome::Inserted(records.len()))
}
