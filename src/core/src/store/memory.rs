use async_trait::async_trait;
use tracing::warn;

use super::{SpotStore, StoreError};
use crate::query::SpotQuery;
use crate::rank::rank_by_key;
use crate::spot::Spot;

/// A spot as persisted, before text rendering. Every column is nullable like
/// its table counterpart; rows with a NULL cannot be mapped to a [`Spot`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoredSpot {
    pub id: String,
    pub name: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub longitude: f64,
    pub latitude: f64,
}

impl StoredSpot {
    pub fn new(
        id: impl Into<String>, name: impl Into<String>, longitude: f64, latitude: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            website: Some(String::new()),
            description: Some(String::new()),
            rating: Some(0.0),
            longitude,
            latitude,
        }
    }

    pub fn with_rating(mut self, rating: Option<f64>) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_website(mut self, website: Option<&str>) -> Self {
        self.website = website.map(str::to_owned);
        self
    }

    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.description = description.map(str::to_owned);
        self
    }

    /// Planar distance in coordinate units, as `ST_Distance` measures two
    /// SRID 4326 geometries.
    fn distance_to(&self, longitude: f64, latitude: f64) -> f64 {
        (self.longitude - longitude).hypot(self.latitude - latitude)
    }

    /// `ST_AsText` rendering of the point.
    fn coordinates(&self) -> String {
        format!("POINT({} {})", self.longitude, self.latitude)
    }

    fn to_spot(&self) -> Option<Spot> {
        Some(Spot {
            id: self.id.clone(),
            name: self.name.clone()?,
            website: self.website.clone()?,
            description: self.description.clone()?,
            rating: self.rating?,
            coordinates: self.coordinates(),
        })
    }
}

/// In-process store evaluating [`SpotQuery`] semantics without a database.
#[derive(Debug, Default)]
pub struct MemorySpotStore {
    spots: Vec<StoredSpot>,
    unavailable: Option<String>,
}

impl MemorySpotStore {
    pub fn new(spots: Vec<StoredSpot>) -> Self {
        Self {
            spots,
            unavailable: None,
        }
    }

    /// Every query fails with [`StoreError::Unavailable`] carrying `reason`.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            spots: Vec::new(),
            unavailable: Some(reason.into()),
        }
    }
}

#[async_trait]
impl SpotStore for MemorySpotStore {
    async fn find_spots(&self, query: &SpotQuery) -> Result<Vec<Spot>, StoreError> {
        if let Some(reason) = &self.unavailable {
            return Err(StoreError::Unavailable(reason.clone()));
        }

        let area = query.area();
        // both area kinds share the inclusive radial predicate
        let mut matched = self
            .spots
            .iter()
            .map(|spot| (spot, spot.distance_to(area.longitude, area.latitude)))
            .filter(|(_, distance)| *distance <= area.radius)
            .collect::<Vec<_>>();
        rank_by_key(query.kind(), matched.as_mut_slice(), |(spot, distance)| {
            (*distance, spot.rating)
        });

        let mut spots = Vec::with_capacity(matched.len());
        for (stored, _distance) in matched {
            match stored.to_spot() {
                Some(spot) => spots.push(spot),
                None => warn!("skipping spot {} with NULL column", stored.id),
            }
        }

        Ok(spots)
    }
}
