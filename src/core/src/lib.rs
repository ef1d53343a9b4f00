mod area;
mod context;
mod query;
mod rank;
mod spot;
mod store;

pub use area::AreaKind;
pub use context::{SpotContext, SpotLookup};
pub use query::SpotQuery;
pub use spot::{SearchArea, Spot};
pub use store::{
    MemorySpotStore, PostgresSpotStore, SpotStore, StoreConfig, StoreError, StoredSpot,
};
