use std::sync::Arc;

use tracing::debug;

use crate::query::SpotQuery;
use crate::spot::{SearchArea, Spot};
use crate::store::{SpotStore, StoreError};

/// Outcome of a lookup. Only [`SpotLookup::Found`] carries store results;
/// the other two answer with an empty list for different reasons.
#[derive(Debug)]
pub enum SpotLookup {
    /// The area tag is not served; the store was not consulted.
    Unsupported,
    Found(Vec<Spot>),
    /// The store failed; the caller still gets an empty list.
    Degraded(StoreError),
}

impl SpotLookup {
    pub fn into_spots(self) -> Vec<Spot> {
        match self {
            SpotLookup::Found(spots) => spots,
            SpotLookup::Unsupported | SpotLookup::Degraded(_) => Vec::new(),
        }
    }
}

/// Entry point for spot lookups over an injected store handle.
#[derive(Clone)]
pub struct SpotContext {
    store: Arc<dyn SpotStore>,
}

impl SpotContext {
    pub fn new(store: Arc<dyn SpotStore>) -> Self {
        Self { store }
    }

    pub async fn lookup(&self, area_tag: &str, area: SearchArea) -> SpotLookup {
        let Some(query) = SpotQuery::build(area_tag, area) else {
            debug!("unsupported area type {area_tag:?}");
            return SpotLookup::Unsupported;
        };

        match self.store.find_spots(&query).await {
            Ok(spots) => SpotLookup::Found(spots),
            Err(e) => SpotLookup::Degraded(e),
        }
    }
}
