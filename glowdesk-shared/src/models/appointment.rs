/// Appointment model
///
/// Bookings tie a client to a location, optionally a staff member, a service
/// and a time slot. List endpoints run the access filter over the fetched
/// collection before responding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Appointment lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "appointment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

/// Appointment row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Unique appointment ID
    pub id: Uuid,

    /// Booked client
    pub client_id: Uuid,

    /// Assigned staff member, if any
    pub staff_id: Option<Uuid>,

    /// Location the appointment is booked at (physical or virtual id)
    pub location_id: String,

    /// Booked service name
    pub service: String,

    /// Scheduled start time
    pub scheduled_at: DateTime<Utc>,

    /// Lifecycle state
    pub status: AppointmentStatus,

    /// When the row was created
    pub created_at: DateTime<Utc>,

    /// When the row was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for booking an appointment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointment {
    /// Booked client
    pub client_id: Uuid,

    /// Assigned staff member
    pub staff_id: Option<Uuid>,

    /// Location id
    pub location_id: String,

    /// Booked service name
    pub service: String,

    /// Scheduled start time
    pub scheduled_at: DateTime<Utc>,
}

impl Appointment {
    /// Books a new appointment.
    pub async fn create(pool: &PgPool, data: CreateAppointment) -> Result<Self, sqlx::Error> {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments (client_id, staff_id, location_id, service, scheduled_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, client_id, staff_id, location_id, service, scheduled_at,
                      status, created_at, updated_at
            "#,
        )
        .bind(data.client_id)
        .bind(data.staff_id)
        .bind(data.location_id)
        .bind(data.service)
        .bind(data.scheduled_at)
        .fetch_one(pool)
        .await?;

        Ok(appointment)
    }

    /// Lists all appointments in schedule order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let appointments = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT id, client_id, staff_id, location_id, service, scheduled_at,
                   status, created_at, updated_at
            FROM appointments
            ORDER BY scheduled_at ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(appointments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::NoShow).unwrap(),
            "\"no_show\""
        );
    }
}
