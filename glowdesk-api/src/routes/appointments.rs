/// Appointment endpoints
///
/// # Endpoints
///
/// - `GET /v1/appointments` - Appointments the principal may see

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Query, State},
    Extension, Json,
};
use glowdesk_shared::{
    access::{filter_appointments, Principal},
    models::appointment::Appointment,
};
use serde::{Deserialize, Serialize};

/// Query parameters for the appointment listing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentListQuery {
    /// Restrict to a single location
    pub location_id: Option<String>,
}

/// Appointment listing response
#[derive(Debug, Serialize)]
pub struct AppointmentListResponse {
    /// Visible appointments in schedule order
    pub appointments: Vec<Appointment>,
}

/// Appointment listing handler
///
/// Fetches all appointments, runs the access scope filter for the optional
/// principal, then applies the optional location query filter.
pub async fn list_appointments(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
    Query(query): Query<AppointmentListQuery>,
) -> ApiResult<Json<AppointmentListResponse>> {
    let appointments = Appointment::list(&state.db).await?;

    let principal = principal.as_ref().map(|Extension(p)| p);
    let mut appointments = filter_appointments(principal, appointments);

    if let Some(location_id) = query.location_id {
        appointments.retain(|a| a.location_id == location_id);
    }

    Ok(Json(AppointmentListResponse { appointments }))
}
