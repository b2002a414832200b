//! # goalpost
//!
//! Cursor pagination over a partitioned, sorted player statistics table,
//! where store-side filtering makes page sizes unpredictable.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use goalpost::pagination::{Cursor, PageAccumulator};
//! use goalpost::query;
//! use goalpost::storage::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> goalpost::Result<()> {
//!     let store = MemoryStore::with_records(goalpost::stats::seed_records());
//!     let plan = query::team_listing_by_goals("USA", "WNT", 10)?;
//!
//!     let accumulator = PageAccumulator::new(&store);
//!     let (records, next) = accumulator.advance(&plan, &Cursor::new(1)).await?;
//!     // `next` resumes right after the last record in `records`
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! caller ──► QueryPlanner ──► PageAccumulator ──► StorageClient
//!              (plan)          (budget, cursor)     (memory | dynamo)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Attribute values, keys and the stored record
pub mod types;

/// Primary, sort and resume key construction
pub mod keys;

/// Query plans for each listing mode
pub mod query;

/// Storage boundary and its implementations
pub mod storage;

/// Page accumulation and cursors
pub mod pagination;

/// Player statistics listings and seed data
pub mod stats;

/// Store configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::{AttrValue, Key, Record};

pub use pagination::{Cursor, PageAccumulator, Pager};
pub use storage::StorageClient;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
