/// Sales transaction model
///
/// Transactions record money movement at a location, optionally tied to a
/// client. Only `completed` transactions count toward a client's total spend;
/// pending, cancelled, and refunded rows are excluded from every aggregate.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE transaction_status AS ENUM ('pending', 'completed', 'cancelled', 'refunded');
///
/// CREATE TABLE transactions (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     client_id UUID REFERENCES clients(id) ON DELETE SET NULL,
///     location_id TEXT NOT NULL,
///     amount DOUBLE PRECISION NOT NULL,
///     status transaction_status NOT NULL DEFAULT 'pending',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Transaction lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transaction_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,

    /// The only state that counts toward client spend
    Completed,

    Cancelled,

    Refunded,
}

/// Sales transaction model
///
/// Named `SaleTransaction` to stay clear of `sqlx::Transaction`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SaleTransaction {
    /// Unique transaction ID
    pub id: Uuid,

    /// Client the sale is attributed to, if known
    pub client_id: Option<Uuid>,

    /// Location where the sale happened (physical or virtual id)
    pub location_id: String,

    /// Sale amount
    pub amount: f64,

    /// Lifecycle state
    pub status: TransactionStatus,

    /// When the transaction was recorded
    pub created_at: DateTime<Utc>,
}

/// Input for recording a new transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransaction {
    /// Client the sale is attributed to
    pub client_id: Option<Uuid>,

    /// Location id
    pub location_id: String,

    /// Sale amount
    pub amount: f64,

    /// Initial state
    pub status: TransactionStatus,
}

/// A completed sale, as consumed by the in-memory spend/recency aggregation
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CompletedSale {
    /// Client the sale is attributed to
    pub client_id: Option<Uuid>,

    /// Sale amount
    pub amount: f64,

    /// When the transaction was recorded
    pub created_at: DateTime<Utc>,
}

impl SaleTransaction {
    /// Records a new transaction.
    pub async fn create(pool: &PgPool, data: CreateTransaction) -> Result<Self, sqlx::Error> {
        let transaction = sqlx::query_as::<_, SaleTransaction>(
            r#"
            INSERT INTO transactions (client_id, location_id, amount, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, client_id, location_id, amount, status, created_at
            "#,
        )
        .bind(data.client_id)
        .bind(data.location_id)
        .bind(data.amount)
        .bind(data.status)
        .fetch_one(pool)
        .await?;

        Ok(transaction)
    }

    /// Fetches every completed transaction. The listing route folds these
    /// into per-client totals and last-activity timestamps in memory.
    pub async fn list_completed(pool: &PgPool) -> Result<Vec<CompletedSale>, sqlx::Error> {
        let sales = sqlx::query_as::<_, CompletedSale>(
            r#"
            SELECT client_id, amount, created_at
            FROM transactions
            WHERE status = 'completed'
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(sales)
    }
}
