/// Location endpoints
///
/// # Endpoints
///
/// - `GET /v1/locations` - Physical locations the principal may see

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Extension, Json};
use glowdesk_shared::{
    access::{filter_locations, Principal},
    models::location::Location,
};
use serde::Serialize;

/// Location listing response
#[derive(Debug, Serialize)]
pub struct LocationListResponse {
    /// Visible locations
    pub locations: Vec<Location>,
}

/// Location listing handler
///
/// Fetches all physical locations and runs the access scope filter for the
/// optional principal. Anonymous callers see everything (public read).
pub async fn list_locations(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
) -> ApiResult<Json<LocationListResponse>> {
    let locations = Location::list(&state.db).await?;

    let principal = principal.as_ref().map(|Extension(p)| p);
    let locations = filter_locations(principal, locations);

    Ok(Json(LocationListResponse { locations }))
}
