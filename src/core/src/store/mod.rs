mod memory;
mod postgres;
mod reconnect;

use async_trait::async_trait;
pub use memory::{MemorySpotStore, StoredSpot};
pub use postgres::{PostgresSpotStore, StoreConfig};
use thiserror::Error;

use crate::query::SpotQuery;
use crate::spot::Spot;

/// Failure to run a query or to enumerate its rows. A single row that cannot
/// be mapped is not an error: stores skip it and keep scanning.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("spot store unavailable: {0}")]
    Unavailable(String),

    #[error("failed to connect to spot store: {0}")]
    Connect(#[source] tokio_postgres::Error),

    #[error("failed to query spots: {0}")]
    Query(#[source] tokio_postgres::Error),

    #[error("failed to iterate spot rows: {0}")]
    Scan(#[source] tokio_postgres::Error),
}

#[async_trait]
pub trait SpotStore: Send + Sync {
    /// Runs `query` and returns the mapped rows in the store's ranked order.
    async fn find_spots(&self, query: &SpotQuery) -> Result<Vec<Spot>, StoreError>;
}
