/// Loyalty-program account model
///
/// Every client gets exactly one loyalty account, created together with the
/// client profile: zero points, bronze tier, active.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE loyalty_tier AS ENUM ('bronze', 'silver', 'gold', 'platinum');
///
/// CREATE TABLE loyalty_accounts (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     client_id UUID NOT NULL UNIQUE REFERENCES clients(id) ON DELETE CASCADE,
///     points INTEGER NOT NULL DEFAULT 0,
///     tier loyalty_tier NOT NULL DEFAULT 'bronze',
///     active BOOLEAN NOT NULL DEFAULT TRUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Loyalty tiers, lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "loyalty_tier", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LoyaltyTier {
    /// Base tier assigned at registration
    Bronze,

    Silver,

    Gold,

    Platinum,
}

impl LoyaltyTier {
    /// Converts tier to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            LoyaltyTier::Bronze => "bronze",
            LoyaltyTier::Silver => "silver",
            LoyaltyTier::Gold => "gold",
            LoyaltyTier::Platinum => "platinum",
        }
    }

    /// Gold and platinum members are treated as VIP in segmentation.
    pub fn is_vip(&self) -> bool {
        matches!(self, LoyaltyTier::Gold | LoyaltyTier::Platinum)
    }
}

/// Loyalty account model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LoyaltyAccount {
    /// Unique loyalty account ID
    pub id: Uuid,

    /// Owning client
    pub client_id: Uuid,

    /// Accumulated points
    pub points: i32,

    /// Current tier
    pub tier: LoyaltyTier,

    /// Whether the account participates in the program
    pub active: bool,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl LoyaltyAccount {
    /// Creates the initial loyalty account for a freshly registered client:
    /// zero points, bronze tier, active.
    ///
    /// Takes a bare connection so the insert joins the client-creation
    /// transaction.
    pub async fn create_initial(
        conn: &mut PgConnection,
        client_id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        let loyalty = sqlx::query_as::<_, LoyaltyAccount>(
            r#"
            INSERT INTO loyalty_accounts (client_id, points, tier, active)
            VALUES ($1, 0, 'bronze', TRUE)
            RETURNING id, client_id, points, tier, active, created_at, updated_at
            "#,
        )
        .bind(client_id)
        .fetch_one(conn)
        .await?;

        Ok(loyalty)
    }

    /// Finds the loyalty account for a client.
    pub async fn find_by_client(
        pool: &PgPool,
        client_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let loyalty = sqlx::query_as::<_, LoyaltyAccount>(
            r#"
            SELECT id, client_id, points, tier, active, created_at, updated_at
            FROM loyalty_accounts
            WHERE client_id = $1
            "#,
        )
        .bind(client_id)
        .fetch_optional(pool)
        .await?;

        Ok(loyalty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_as_str() {
        assert_eq!(LoyaltyTier::Bronze.as_str(), "bronze");
        assert_eq!(LoyaltyTier::Platinum.as_str(), "platinum");
    }

    #[test]
    fn test_vip_tiers() {
        assert!(!LoyaltyTier::Bronze.is_vip());
        assert!(!LoyaltyTier::Silver.is_vip());
        assert!(LoyaltyTier::Gold.is_vip());
        assert!(LoyaltyTier::Platinum.is_vip());
    }
}
