/// Staff endpoints
///
/// # Endpoints
///
/// - `GET  /v1/staff` - Staff the principal may see (assigned-set intersection)
/// - `POST /v1/staff` - Create a staff member with location assignments

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use glowdesk_shared::{
    access::{filter_staff, Principal, Role},
    models::staff::{CreateStaff, Staff, StaffWithLocations},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Staff listing response
#[derive(Debug, Serialize)]
pub struct StaffListResponse {
    /// Visible staff with their assigned-location sets
    pub staff: Vec<StaffWithLocations>,
}

/// Create staff request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStaffRequest {
    /// Display name
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    /// Job title
    pub title: Option<String>,

    /// Contact phone
    pub phone: Option<String>,

    /// Locations to assign
    #[serde(default)]
    pub location_ids: Vec<String>,
}

/// Staff listing handler
///
/// Admin and "all"-access principals see everyone; everyone else sees staff
/// whose assigned-location set intersects their own.
pub async fn list_staff(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
) -> ApiResult<Json<StaffListResponse>> {
    let staff = Staff::list_with_locations(&state.db).await?;

    let principal = principal.as_ref().map(|Extension(p)| p);
    let staff = filter_staff(principal, staff);

    Ok(Json(StaffListResponse { staff }))
}

/// Create staff handler
///
/// The staff row and its location-assignment join rows are written in one
/// transaction. Requires an admin or manager principal.
///
/// # Errors
///
/// - `401 Unauthorized`: No principal
/// - `403 Forbidden`: Principal is not admin or manager
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_staff(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
    Json(req): Json<CreateStaffRequest>,
) -> ApiResult<Json<StaffWithLocations>> {
    let Some(Extension(principal)) = principal else {
        return Err(ApiError::Unauthorized(
            "Authentication required".to_string(),
        ));
    };

    if !matches!(principal.role, Role::Admin | Role::Manager) {
        return Err(ApiError::Forbidden(
            "Only admins and managers can create staff".to_string(),
        ));
    }

    req.validate().map_err(validation_error)?;

    let staff = Staff::create(
        &state.db,
        CreateStaff {
            name: req.name,
            title: req.title,
            phone: req.phone,
            location_ids: req.location_ids,
        },
    )
    .await?;

    Ok(Json(staff))
}
