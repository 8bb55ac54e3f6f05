/// Account model and database operations
///
/// Every login identity in GlowDesk — client or staff — is backed by an
/// account row. Client accounts are usually manufactured by the create-client
/// flow with a placeholder email and the default walk-in credential; staff
/// accounts are provisioned by an administrator.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE accounts (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email CITEXT NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     role VARCHAR(32) NOT NULL DEFAULT 'client',
///     locations TEXT[] NOT NULL DEFAULT '{}',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Domain used for placeholder emails generated by the create-client flow.
pub const PLACEHOLDER_EMAIL_DOMAIN: &str = "glowdesk.local";

/// Builds the placeholder email for an auto-registered client account.
///
/// The local part embeds the digits-only phone so regenerating it for the
/// same client is deterministic.
pub fn placeholder_email(normalized_phone: &str) -> String {
    format!("client+{}@{}", normalized_phone, PLACEHOLDER_EMAIL_DOMAIN)
}

/// Account model representing a login identity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    /// Unique account ID (UUID v4)
    pub id: Uuid,

    /// Email address (case-insensitive via CITEXT), unique across accounts
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// Role tag; parsed into the closed role set at the boundary
    pub role: String,

    /// Assigned location identifiers; may contain the "all" sentinel
    pub locations: Vec<String>,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccount {
    /// Email address
    pub email: String,

    /// Argon2id password hash (NOT plaintext!)
    pub password_hash: String,

    /// Role tag (e.g. "client", "staff", "admin")
    pub role: String,

    /// Assigned location identifiers
    pub locations: Vec<String>,
}

impl Account {
    /// Creates a new account on the given connection.
    ///
    /// Takes a bare connection so callers can run it inside a transaction
    /// together with the client and loyalty inserts.
    ///
    /// # Errors
    ///
    /// Returns an error if the email already exists (unique constraint) or
    /// the database write fails.
    pub async fn create(conn: &mut PgConnection, data: CreateAccount) -> Result<Self, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (email, password_hash, role, locations)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, role, locations, created_at, updated_at
            "#,
        )
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.role)
        .bind(data.locations)
        .fetch_one(conn)
        .await?;

        Ok(account)
    }

    /// Finds an account by email address (case-insensitive via CITEXT).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, password_hash, role, locations, created_at, updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(account)
    }

    /// Finds an account by ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, password_hash, role, locations, created_at, updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(account)
    }
}
