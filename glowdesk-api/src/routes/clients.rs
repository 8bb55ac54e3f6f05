/// Client endpoints
///
/// The reception-desk surface: duplicate checking, client creation, and the
/// shaped client listing. Every creation path runs the duplicate scan —
/// uniqueness of normalized name and phone is an application-level invariant,
/// so correctness depends on this route being the only way in.
///
/// # Endpoints
///
/// - `POST /v1/clients/duplicate-check` - Scan for matches by name/phone
/// - `POST /v1/clients` - Create client (account + profile + loyalty)
/// - `GET  /v1/clients` - Shaped listing with segment, avatar, total spend

use std::collections::HashMap;

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult},
};
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use glowdesk_shared::{
    auth::password::{self, DEFAULT_WALK_IN_PASSWORD},
    identity::{blocking_duplicate, find_duplicates, initials_avatar, normalize_name, normalize_phone, DuplicateMatch},
    models::{
        account::{placeholder_email, Account, CreateAccount},
        client::{parse_preferences, Client, ClientPreferences, ClientSegment, NewClient},
        loyalty::{LoyaltyAccount, LoyaltyTier},
        transaction::SaleTransaction,
    },
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Duplicate check request
#[derive(Debug, Deserialize)]
pub struct DuplicateCheckRequest {
    /// Candidate name
    pub name: Option<String>,

    /// Candidate phone
    pub phone: Option<String>,
}

/// Duplicate check response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateCheckResponse {
    /// Whether any match was found
    pub has_duplicates: bool,

    /// The matches, phone match first when both keys hit
    pub duplicates: Vec<DuplicateMatch>,
}

/// Create client request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    /// Display name (required)
    pub name: String,

    /// Phone number (required)
    pub phone: String,

    /// Email; a placeholder is generated when absent
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// Street address
    pub address: Option<String>,

    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,

    /// Structured preferences
    pub preferences: Option<ClientPreferences>,

    /// Free-form notes
    pub notes: Option<String>,

    /// Preferred physical location
    pub preferred_location_id: Option<String>,

    /// Where the record came from
    pub registration_source: Option<String>,
}

/// Loyalty state in the composed client view
#[derive(Debug, Serialize)]
pub struct LoyaltyView {
    /// Accumulated points
    pub points: i32,

    /// Current tier
    pub tier: LoyaltyTier,

    /// Whether the account participates in the program
    pub active: bool,
}

/// Composed client view returned by the create endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCreatedResponse {
    /// Client ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Phone as entered
    pub phone: Option<String>,

    /// Account email (possibly the generated placeholder)
    pub email: String,

    /// Initials avatar
    pub avatar: String,

    /// Derived segment; always "New" at creation
    pub segment: ClientSegment,

    /// Completed-transaction total; zero at creation
    pub total_spent: f64,

    /// Initial loyalty state
    pub loyalty: LoyaltyView,

    /// Where the record came from
    pub registration_source: String,

    /// True: the account was manufactured by this flow
    pub auto_registered: bool,

    /// When the client was created
    pub created_at: DateTime<Utc>,
}

/// Query parameters for the client listing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientListQuery {
    /// Restrict to clients preferring this location
    pub location_id: Option<String>,
}

/// One shaped entry in the client listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientListEntry {
    /// Client ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Phone as entered
    pub phone: Option<String>,

    /// Account email
    pub email: Option<String>,

    /// Initials avatar
    pub avatar: String,

    /// Derived segment
    pub segment: ClientSegment,

    /// Sum of completed transactions
    pub total_spent: f64,

    /// Structured preferences (lenient read)
    pub preferences: ClientPreferences,

    /// Preferred physical location
    pub preferred_location_id: Option<String>,

    /// When the client was created
    pub created_at: DateTime<Utc>,
}

/// Client listing response
#[derive(Debug, Serialize)]
pub struct ClientListResponse {
    /// Shaped entries in stable fetch order
    pub clients: Vec<ClientListEntry>,
}

/// Duplicate check handler
///
/// Scans the full client collection for normalized-key matches.
///
/// # Errors
///
/// - `400 Bad Request`: Both name and phone are empty or absent
/// - `500 Internal Server Error`: Persistence failure
pub async fn duplicate_check(
    State(state): State<AppState>,
    Json(req): Json<DuplicateCheckRequest>,
) -> ApiResult<Json<DuplicateCheckResponse>> {
    let clients = Client::list_with_accounts(&state.db).await?;

    let duplicates = find_duplicates(req.name.as_deref(), req.phone.as_deref(), &clients)?;

    Ok(Json(DuplicateCheckResponse {
        has_duplicates: !duplicates.is_empty(),
        duplicates,
    }))
}

/// Create client handler
///
/// Runs the duplicate scan, then creates the owning account, the client
/// profile, and the initial loyalty record in one transaction. A duplicate
/// on either key is a 409 with the matched client; phone outranks name.
///
/// # Errors
///
/// - `400 Bad Request`: Missing name or phone
/// - `409 Conflict`: Duplicate client (scan hit, or a concurrent insert
///   losing against the unique indexes)
/// - `422 Unprocessable Entity`: Field validation failed
/// - `500 Internal Server Error`: Persistence failure
pub async fn create_client(
    State(state): State<AppState>,
    Json(req): Json<CreateClientRequest>,
) -> ApiResult<Json<ClientCreatedResponse>> {
    req.validate().map_err(validation_error)?;

    let name = req.name.trim().to_string();
    let phone_key = normalize_phone(&req.phone);

    if name.is_empty() || phone_key.is_empty() {
        return Err(ApiError::BadRequest(
            "Name and phone are required".to_string(),
        ));
    }

    // Same scan as the duplicate-check endpoint; phone outranks name
    let existing = Client::list_with_accounts(&state.db).await?;
    let matches = find_duplicates(Some(&name), Some(&req.phone), &existing)?;

    if let Some(duplicate) = blocking_duplicate(&matches) {
        return Err(ApiError::Duplicate {
            duplicate_type: duplicate.match_type,
            existing_client: duplicate.client.clone(),
            message: duplicate.match_type.message().to_string(),
        });
    }

    let email = match req.email {
        Some(email) => email,
        None => placeholder_email(&phone_key),
    };
    let auto_registered = true;
    let password_hash = password::hash_password(DEFAULT_WALK_IN_PASSWORD)?;

    let preferences = match req.preferences {
        Some(prefs) => Some(
            serde_json::to_value(prefs)
                .map_err(|e| ApiError::InternalError(format!("Preference encoding failed: {}", e)))?,
        ),
        None => None,
    };

    // Account, client, and loyalty are all-or-nothing
    let mut tx = state.db.begin().await?;

    let account = Account::create(
        &mut tx,
        CreateAccount {
            email,
            password_hash,
            role: "client".to_string(),
            locations: vec![],
        },
    )
    .await?;

    let client = Client::create(
        &mut tx,
        NewClient {
            account_id: account.id,
            name_normalized: normalize_name(&name),
            name,
            phone: Some(req.phone.clone()),
            phone_normalized: Some(phone_key),
            address: req.address,
            date_of_birth: req.date_of_birth,
            preferences,
            notes: req.notes,
            preferred_location_id: req.preferred_location_id,
            registration_source: req
                .registration_source
                .unwrap_or_else(|| "reception".to_string()),
            auto_registered,
        },
    )
    .await?;

    let loyalty = LoyaltyAccount::create_initial(&mut tx, client.id).await?;

    tx.commit().await?;

    let avatar = initials_avatar(&client.name);

    Ok(Json(ClientCreatedResponse {
        id: client.id,
        name: client.name,
        phone: client.phone,
        email: account.email,
        avatar,
        segment: ClientSegment::New,
        total_spent: 0.0,
        loyalty: LoyaltyView {
            points: loyalty.points,
            tier: loyalty.tier,
            active: loyalty.active,
        },
        registration_source: client.registration_source,
        auto_registered: client.auto_registered,
        created_at: client.created_at,
    }))
}

/// Client listing handler
///
/// Shapes each client with its derived segment, initials avatar, and the
/// completed-transaction total. Aggregation is a single in-memory pass over
/// the already-fetched collections.
pub async fn list_clients(
    State(state): State<AppState>,
    Query(query): Query<ClientListQuery>,
) -> ApiResult<Json<ClientListResponse>> {
    let details = Client::list_detailed(&state.db, query.location_id.as_deref()).await?;
    let completed = SaleTransaction::list_completed(&state.db).await?;

    // Fold completed sales into per-client totals and last-activity stamps
    let mut spend: HashMap<Uuid, (f64, DateTime<Utc>)> = HashMap::new();
    for sale in completed {
        let Some(client_id) = sale.client_id else {
            continue;
        };
        let entry = spend.entry(client_id).or_insert((0.0, sale.created_at));
        entry.0 += sale.amount;
        if sale.created_at > entry.1 {
            entry.1 = sale.created_at;
        }
    }

    let now = Utc::now();
    let clients = details
        .into_iter()
        .map(|detail| {
            let (total_spent, last_completed_at) = spend
                .get(&detail.id)
                .map(|(total, last)| (*total, Some(*last)))
                .unwrap_or((0.0, None));

            ClientListEntry {
                avatar: initials_avatar(&detail.name),
                segment: ClientSegment::classify(
                    detail.created_at,
                    detail.tier,
                    last_completed_at,
                    now,
                ),
                total_spent,
                preferences: parse_preferences(detail.id, detail.preferences.as_ref()),
                id: detail.id,
                name: detail.name,
                phone: detail.phone,
                email: detail.email,
                preferred_location_id: detail.preferred_location_id,
                created_at: detail.created_at,
            }
        })
        .collect();

    Ok(Json(ClientListResponse { clients }))
}
