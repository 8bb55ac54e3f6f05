/// Staff model and database operations
///
/// Staff members carry an assigned-location set through the `staff_locations`
/// join table. The access filter intersects that set with the principal's.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE staff (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     account_id UUID UNIQUE REFERENCES accounts(id) ON DELETE SET NULL,
///     name VARCHAR(255) NOT NULL,
///     title VARCHAR(128),
///     phone VARCHAR(64),
///     active BOOLEAN NOT NULL DEFAULT TRUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
/// CREATE TABLE staff_locations (
///     staff_id UUID NOT NULL REFERENCES staff(id) ON DELETE CASCADE,
///     location_id TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (staff_id, location_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Staff row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Staff {
    /// Unique staff ID
    pub id: Uuid,

    /// Login account, if the staff member has one
    pub account_id: Option<Uuid>,

    /// Display name
    pub name: String,

    /// Job title (e.g. "Senior Stylist")
    pub title: Option<String>,

    /// Contact phone
    pub phone: Option<String>,

    /// Whether the staff member is currently employed
    pub active: bool,

    /// When the row was created
    pub created_at: DateTime<Utc>,

    /// When the row was last updated
    pub updated_at: DateTime<Utc>,
}

/// Staff member together with their assigned-location set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffWithLocations {
    /// Unique staff ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Job title
    pub title: Option<String>,

    /// Contact phone
    pub phone: Option<String>,

    /// Whether the staff member is currently employed
    pub active: bool,

    /// Assigned location identifiers
    pub location_ids: Vec<String>,

    /// When the row was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a staff member with location assignments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStaff {
    /// Display name
    pub name: String,

    /// Job title
    pub title: Option<String>,

    /// Contact phone
    pub phone: Option<String>,

    /// Locations to assign
    pub location_ids: Vec<String>,
}

/// Join row from `staff_locations`, used to assemble assigned sets in memory
#[derive(Debug, Clone, sqlx::FromRow)]
struct StaffLocationRow {
    staff_id: Uuid,
    location_id: String,
}

impl Staff {
    /// Creates a staff member and their location-assignment join rows in one
    /// transaction.
    pub async fn create(pool: &PgPool, data: CreateStaff) -> Result<StaffWithLocations, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let staff = sqlx::query_as::<_, Staff>(
            r#"
            INSERT INTO staff (name, title, phone)
            VALUES ($1, $2, $3)
            RETURNING id, account_id, name, title, phone, active, created_at, updated_at
            "#,
        )
        .bind(&data.name)
        .bind(&data.title)
        .bind(&data.phone)
        .fetch_one(&mut *tx)
        .await?;

        for location_id in &data.location_ids {
            sqlx::query(
                r#"
                INSERT INTO staff_locations (staff_id, location_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(staff.id)
            .bind(location_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(StaffWithLocations {
            id: staff.id,
            name: staff.name,
            title: staff.title,
            phone: staff.phone,
            active: staff.active,
            location_ids: data.location_ids,
            created_at: staff.created_at,
        })
    }

    /// Lists all staff with their assigned-location sets.
    ///
    /// Two queries, joined in memory; the access filter then runs over the
    /// assembled list.
    pub async fn list_with_locations(pool: &PgPool) -> Result<Vec<StaffWithLocations>, sqlx::Error> {
        let staff = sqlx::query_as::<_, Staff>(
            r#"
            SELECT id, account_id, name, title, phone, active, created_at, updated_at
            FROM staff
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        let assignments = sqlx::query_as::<_, StaffLocationRow>(
            r#"
            SELECT staff_id, location_id
            FROM staff_locations
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        let mut result: Vec<StaffWithLocations> = staff
            .into_iter()
            .map(|s| StaffWithLocations {
                id: s.id,
                name: s.name,
                title: s.title,
                phone: s.phone,
                active: s.active,
                location_ids: Vec::new(),
                created_at: s.created_at,
            })
            .collect();

        for row in assignments {
            if let Some(member) = result.iter_mut().find(|s| s.id == row.staff_id) {
                member.location_ids.push(row.location_id);
            }
        }

        Ok(result)
    }
}
