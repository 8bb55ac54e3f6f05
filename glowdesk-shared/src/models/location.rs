/// Location model and the virtual location tags
///
/// Physical locations are rows in the `locations` table, addressed by string
/// identifiers. Two additional identifiers are reserved and never stored:
/// the online storefront and home-service delivery. They are addressable for
/// access-filtering purposes but follow their own access rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Virtual location id for the online storefront. Visible to admin and sales.
pub const ONLINE_STORE: &str = "online";

/// Virtual location id for home-service delivery. Visible to admin only.
pub const HOME_SERVICE: &str = "home";

/// Returns true if the id names one of the two virtual locations.
pub fn is_virtual(location_id: &str) -> bool {
    location_id == ONLINE_STORE || location_id == HOME_SERVICE
}

/// A physical salon location
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Location {
    /// Location identifier string
    pub id: String,

    /// Display name
    pub name: String,

    /// Street address
    pub address: Option<String>,

    /// Whether the location is currently operating
    pub active: bool,

    /// When the row was created
    pub created_at: DateTime<Utc>,
}

impl Location {
    /// Lists all physical locations in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let locations = sqlx::query_as::<_, Location>(
            r#"
            SELECT id, name, address, active, created_at
            FROM locations
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(locations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_virtual_ids() {
        assert!(is_virtual(ONLINE_STORE));
        assert!(is_virtual(HOME_SERVICE));
        assert!(!is_virtual("downtown"));
        assert!(!is_virtual("all"));
    }
}
