use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use spots::{Spot, SpotContext, SpotLookup};
use tracing::{debug, error};

use super::error::ApiError;
use super::params::SpotParams;

/// `GET /spots`: 400 on invalid coordinates, otherwise always 200 with a list.
pub async fn get_spots(
    State(context): State<Arc<SpotContext>>, Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Spot>>, ApiError> {
    let params = SpotParams::from_pairs(pairs);
    let area = params.search_area()?;
    debug!("spots lookup: type={:?}, area={:?}", params.area_tag(), area);

    let lookup = context.lookup(params.area_tag(), area).await;
    if let SpotLookup::Degraded(e) = &lookup {
        error!("spot lookup failed, answering with no spots: {e}");
    }

    Ok(Json(lookup.into_spots()))
}
