/// Transaction endpoints
///
/// # Endpoints
///
/// - `POST /v1/transactions` - Record a sale

use crate::{
    app::AppState,
    error::{validation_error, ApiResult},
};
use axum::{extract::State, Json};
use glowdesk_shared::models::transaction::{CreateTransaction, SaleTransaction, TransactionStatus};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Create transaction request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    /// Client the sale is attributed to
    pub client_id: Option<Uuid>,

    /// Location where the sale happened
    #[validate(length(min = 1, message = "Location is required"))]
    pub location_id: String,

    /// Sale amount
    #[validate(range(min = 0.0, message = "Amount must not be negative"))]
    pub amount: f64,

    /// Initial state; defaults to pending
    pub status: Option<TransactionStatus>,
}

/// Create transaction handler
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
/// - `500 Internal Server Error`: Persistence failure
pub async fn create_transaction(
    State(state): State<AppState>,
    Json(req): Json<CreateTransactionRequest>,
) -> ApiResult<Json<SaleTransaction>> {
    req.validate().map_err(validation_error)?;

    let transaction = SaleTransaction::create(
        &state.db,
        CreateTransaction {
            client_id: req.client_id,
            location_id: req.location_id,
            amount: req.amount,
            status: req.status.unwrap_or(TransactionStatus::Pending),
        },
    )
    .await?;

    Ok(Json(transaction))
}
