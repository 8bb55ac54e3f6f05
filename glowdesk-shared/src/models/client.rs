/// Client model and database operations
///
/// Clients are the salon's customer records. Every client row references an
/// owning account (which carries the email and credential) and has exactly one
/// loyalty account. Uniqueness is keyed on the normalized name and phone
/// columns, which the application fills in at insert time.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE clients (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     account_id UUID NOT NULL UNIQUE REFERENCES accounts(id) ON DELETE CASCADE,
///     name VARCHAR(255) NOT NULL,
///     name_normalized VARCHAR(255) NOT NULL,
///     phone VARCHAR(64),
///     phone_normalized VARCHAR(64),
///     address VARCHAR(512),
///     date_of_birth DATE,
///     preferences JSONB,
///     notes TEXT,
///     preferred_location_id TEXT REFERENCES locations(id),
///     registration_source VARCHAR(64) NOT NULL DEFAULT 'reception',
///     auto_registered BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use glowdesk_shared::models::client::Client;
/// use glowdesk_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// // Fetch the full collection with account emails for a duplicate scan
/// let clients = Client::list_with_accounts(&pool).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use tracing::warn;
use uuid::Uuid;

use super::loyalty::LoyaltyTier;

/// Full client row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Client {
    /// Unique client ID (UUID v4)
    pub id: Uuid,

    /// Owning account reference
    pub account_id: Uuid,

    /// Display name, free text
    pub name: String,

    /// Trimmed, case-folded name; sole name comparison key
    pub name_normalized: String,

    /// Phone number as entered
    pub phone: Option<String>,

    /// Digits-only phone; sole phone comparison key
    pub phone_normalized: Option<String>,

    /// Street address
    pub address: Option<String>,

    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,

    /// Serialized preferences; read leniently, see [`parse_preferences`]
    pub preferences: Option<serde_json::Value>,

    /// Free-form notes
    pub notes: Option<String>,

    /// Preferred physical location
    pub preferred_location_id: Option<String>,

    /// Where the record came from (e.g. "reception", "online")
    pub registration_source: String,

    /// True when the backing account was manufactured by the create flow
    pub auto_registered: bool,

    /// When the client was created
    pub created_at: DateTime<Utc>,

    /// When the client was last updated
    pub updated_at: DateTime<Utc>,
}

/// Client summary with the account email, as consumed by the duplicate scan
/// and returned in conflict responses.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ClientWithAccount {
    /// Client ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Phone number as entered
    pub phone: Option<String>,

    /// Email from the owning account
    pub email: Option<String>,

    /// Preferred physical location
    pub preferred_location_id: Option<String>,

    /// When the client was created
    pub created_at: DateTime<Utc>,
}

/// Client row joined with loyalty state, as consumed by the shaped listing.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClientDetail {
    /// Client ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Phone number as entered
    pub phone: Option<String>,

    /// Email from the owning account
    pub email: Option<String>,

    /// Serialized preferences
    pub preferences: Option<serde_json::Value>,

    /// Preferred physical location
    pub preferred_location_id: Option<String>,

    /// Loyalty tier, if a loyalty account exists
    pub tier: Option<LoyaltyTier>,

    /// Loyalty points
    pub points: Option<i32>,

    /// When the client was created
    pub created_at: DateTime<Utc>,
}

/// Structured client preferences
///
/// The serialized form in the database is read leniently: a malformed value
/// falls back to this default shape rather than failing the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientPreferences {
    /// Services the client books most often
    pub preferred_services: Vec<String>,

    /// Free-text allergy notes for treatments
    pub allergies: Option<String>,

    /// Whether the client opted into marketing messages
    pub marketing_opt_in: bool,
}

/// Parses a stored preferences value, substituting the default shape when the
/// serialized structure is malformed. The anomaly is logged, not surfaced.
pub fn parse_preferences(client_id: Uuid, raw: Option<&serde_json::Value>) -> ClientPreferences {
    match raw {
        None => ClientPreferences::default(),
        Some(value) => match serde_json::from_value(value.clone()) {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!(client_id = %client_id, error = %e, "Malformed client preferences, using defaults");
                ClientPreferences::default()
            }
        },
    }
}

/// Derived client classification, computed per listing and never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientSegment {
    /// Registered within the last 30 days
    New,

    /// Gold or platinum loyalty tier
    #[serde(rename = "VIP")]
    Vip,

    /// Active in the last 90 days
    Regular,

    /// No completed transaction within 90 days
    #[serde(rename = "At Risk")]
    AtRisk,
}

impl ClientSegment {
    /// Classifies a client from account age, loyalty tier, and the recency of
    /// the last completed transaction. Checks run in priority order: New
    /// before VIP before At Risk.
    pub fn classify(
        registered_at: DateTime<Utc>,
        tier: Option<LoyaltyTier>,
        last_completed_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        if now - registered_at < chrono::Duration::days(30) {
            return ClientSegment::New;
        }

        if tier.is_some_and(|t| t.is_vip()) {
            return ClientSegment::Vip;
        }

        match last_completed_at {
            Some(last) if now - last <= chrono::Duration::days(90) => ClientSegment::Regular,
            _ => ClientSegment::AtRisk,
        }
    }

    /// Display string, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientSegment::New => "New",
            ClientSegment::Vip => "VIP",
            ClientSegment::Regular => "Regular",
            ClientSegment::AtRisk => "At Risk",
        }
    }
}

/// Input for inserting a new client row
///
/// The normalized key columns must be filled by the caller (the identity
/// resolver owns the normalization rules).
#[derive(Debug, Clone)]
pub struct NewClient {
    /// Owning account
    pub account_id: Uuid,

    /// Display name
    pub name: String,

    /// Normalized name key
    pub name_normalized: String,

    /// Phone as entered
    pub phone: Option<String>,

    /// Normalized phone key
    pub phone_normalized: Option<String>,

    /// Street address
    pub address: Option<String>,

    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,

    /// Structured preferences, serialized to jsonb
    pub preferences: Option<serde_json::Value>,

    /// Free-form notes
    pub notes: Option<String>,

    /// Preferred physical location
    pub preferred_location_id: Option<String>,

    /// Where the record came from
    pub registration_source: String,

    /// True when the account was manufactured by the create flow
    pub auto_registered: bool,
}

impl Client {
    /// Creates a new client row on the given connection.
    ///
    /// Takes a bare connection so the insert joins the account/loyalty
    /// transaction. The unique indexes on the normalized columns reject a
    /// concurrent duplicate at commit.
    pub async fn create(conn: &mut PgConnection, data: NewClient) -> Result<Self, sqlx::Error> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (
                account_id, name, name_normalized, phone, phone_normalized,
                address, date_of_birth, preferences, notes,
                preferred_location_id, registration_source, auto_registered
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id, account_id, name, name_normalized, phone, phone_normalized,
                      address, date_of_birth, preferences, notes,
                      preferred_location_id, registration_source, auto_registered,
                      created_at, updated_at
            "#,
        )
        .bind(data.account_id)
        .bind(data.name)
        .bind(data.name_normalized)
        .bind(data.phone)
        .bind(data.phone_normalized)
        .bind(data.address)
        .bind(data.date_of_birth)
        .bind(data.preferences)
        .bind(data.notes)
        .bind(data.preferred_location_id)
        .bind(data.registration_source)
        .bind(data.auto_registered)
        .fetch_one(conn)
        .await?;

        Ok(client)
    }

    /// Fetches the full client collection with account emails, in stable
    /// fetch order (creation order). The duplicate scan depends on this
    /// ordering for its first-occurrence tie-break.
    pub async fn list_with_accounts(pool: &PgPool) -> Result<Vec<ClientWithAccount>, sqlx::Error> {
        let clients = sqlx::query_as::<_, ClientWithAccount>(
            r#"
            SELECT c.id, c.name, c.phone, a.email::text AS email,
                   c.preferred_location_id, c.created_at
            FROM clients c
            JOIN accounts a ON a.id = c.account_id
            ORDER BY c.created_at ASC, c.id ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(clients)
    }

    /// Fetches clients joined with loyalty state for the shaped listing,
    /// optionally restricted to a preferred location.
    pub async fn list_detailed(
        pool: &PgPool,
        location_id: Option<&str>,
    ) -> Result<Vec<ClientDetail>, sqlx::Error> {
        let clients = sqlx::query_as::<_, ClientDetail>(
            r#"
            SELECT c.id, c.name, c.phone, a.email::text AS email, c.preferences,
                   c.preferred_location_id, l.tier, l.points, c.created_at
            FROM clients c
            JOIN accounts a ON a.id = c.account_id
            LEFT JOIN loyalty_accounts l ON l.client_id = c.id
            WHERE $1::text IS NULL OR c.preferred_location_id = $1
            ORDER BY c.created_at ASC, c.id ASC
            "#,
        )
        .bind(location_id)
        .fetch_all(pool)
        .await?;

        Ok(clients)
    }

    /// Finds a client by ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, account_id, name, name_normalized, phone, phone_normalized,
                   address, date_of_birth, preferences, notes,
                   preferred_location_id, registration_source, auto_registered,
                   created_at, updated_at
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_preferences_valid() {
        let raw = json!({
            "preferredServices": ["manicure", "facial"],
            "allergies": "lavender oil",
            "marketingOptIn": true
        });

        let prefs = parse_preferences(Uuid::new_v4(), Some(&raw));
        assert_eq!(prefs.preferred_services, vec!["manicure", "facial"]);
        assert_eq!(prefs.allergies.as_deref(), Some("lavender oil"));
        assert!(prefs.marketing_opt_in);
    }

    #[test]
    fn test_parse_preferences_missing_fields_use_defaults() {
        let raw = json!({ "allergies": "none" });

        let prefs = parse_preferences(Uuid::new_v4(), Some(&raw));
        assert!(prefs.preferred_services.is_empty());
        assert!(!prefs.marketing_opt_in);
    }

    #[test]
    fn test_parse_preferences_malformed_falls_back() {
        // A bare string is not the documented shape
        let raw = json!("not-an-object");

        let prefs = parse_preferences(Uuid::new_v4(), Some(&raw));
        assert_eq!(prefs, ClientPreferences::default());
    }

    #[test]
    fn test_parse_preferences_absent() {
        let prefs = parse_preferences(Uuid::new_v4(), None);
        assert_eq!(prefs, ClientPreferences::default());
    }

    #[test]
    fn test_segment_new_takes_priority() {
        let now = Utc::now();
        let segment = ClientSegment::classify(
            now - chrono::Duration::days(5),
            Some(LoyaltyTier::Platinum),
            None,
            now,
        );
        assert_eq!(segment, ClientSegment::New);
    }

    #[test]
    fn test_segment_vip() {
        let now = Utc::now();
        let segment = ClientSegment::classify(
            now - chrono::Duration::days(120),
            Some(LoyaltyTier::Gold),
            None,
            now,
        );
        assert_eq!(segment, ClientSegment::Vip);
    }

    #[test]
    fn test_segment_regular_vs_at_risk() {
        let now = Utc::now();
        let registered = now - chrono::Duration::days(200);

        let recent = ClientSegment::classify(
            registered,
            Some(LoyaltyTier::Silver),
            Some(now - chrono::Duration::days(10)),
            now,
        );
        assert_eq!(recent, ClientSegment::Regular);

        let stale = ClientSegment::classify(
            registered,
            Some(LoyaltyTier::Silver),
            Some(now - chrono::Duration::days(120)),
            now,
        );
        assert_eq!(stale, ClientSegment::AtRisk);

        let never = ClientSegment::classify(registered, None, None, now);
        assert_eq!(never, ClientSegment::AtRisk);
    }

    #[test]
    fn test_segment_serialization() {
        assert_eq!(
            serde_json::to_string(&ClientSegment::AtRisk).unwrap(),
            "\"At Risk\""
        );
        assert_eq!(serde_json::to_string(&ClientSegment::Vip).unwrap(), "\"VIP\"");
        assert_eq!(ClientSegment::New.as_str(), "New");
    }
}
