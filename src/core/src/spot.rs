use serde::{Deserialize, Serialize};

/// A point of interest as returned to callers. Field order is the JSON order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    pub id: String,
    pub name: String,
    pub website: String,
    pub description: String,
    pub rating: f64,
    /// Store's text rendering of the point, e.g. `POINT(-73 40)`.
    pub coordinates: String,
}

/// Origin and radius of a lookup, in the store's coordinate units (SRID 4326).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchArea {
    pub longitude: f64,
    pub latitude: f64,
    pub radius: f64,
}

impl SearchArea {
    pub fn new(longitude: f64, latitude: f64, radius: f64) -> Self {
        Self {
            longitude,
            latitude,
            radius,
        }
    }
}
