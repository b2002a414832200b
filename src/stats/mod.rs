//! Player statistics listings
//!
//! The listing operations callers use, each built from a query plan and
//! driven through the storage boundary, plus the demonstration seed data.

mod seed;
mod service;

pub use seed::{insert_seed_data, seed_records, SeedOutcome};
pub use service::PlayerStats;
