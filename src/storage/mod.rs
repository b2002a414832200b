//! Storage boundary
//!
//! The capability set the pagination core needs from a data store
//! (`scan`, `get_item`, `put_item`, `query`), with an in-memory
//! implementation for tests and a DynamoDB implementation for real use.

mod dynamo;
mod memory;
mod types;

pub use dynamo::DynamoStore;
pub use memory::{MemoryStore, RecordedQuery};
pub use types::{QueryPage, QueryRequest, StorageClient};

use crate::config::{Backend, StoreConfig};
use std::sync::Arc;

/// Construct the storage client selected by `config`
pub async fn connect(config: &StoreConfig) -> Arc<dyn StorageClient> {
    match config.backend {
        Backend::Memory => Arc::new(MemoryStore::new()),
        Backend::Dynamo => Arc::new(DynamoStore::connect(config).await),
    }
}
