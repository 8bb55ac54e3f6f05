/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use glowdesk_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = glowdesk_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError, middleware::security::SecurityHeadersLayer};
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use glowdesk_shared::auth::{jwt, middleware as auth};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                        # Health check (public)
/// └── /v1/                           # API v1 (versioned)
///     ├── /auth/
///     │   ├── POST /login
///     │   └── POST /refresh
///     ├── /clients/
///     │   ├── GET  /                 # Shaped listing
///     │   ├── POST /                 # Create (runs the duplicate scan)
///     │   └── POST /duplicate-check
///     ├── /locations/  GET
///     ├── /staff/      GET, POST
///     ├── /appointments/ GET
///     └── /transactions/ POST
/// ```
///
/// Every `/v1` route runs the principal layer: a Bearer token, when present,
/// is validated and its principal injected into request extensions; anonymous
/// requests pass through without one (reads fall back to public access).
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no principal required)
    let auth_routes = Router::new()
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh));

    let client_routes = Router::new()
        .route("/", get(routes::clients::list_clients))
        .route("/", post(routes::clients::create_client))
        .route("/duplicate-check", post(routes::clients::duplicate_check));

    let location_routes = Router::new().route("/", get(routes::locations::list_locations));

    let staff_routes = Router::new()
        .route("/", get(routes::staff::list_staff))
        .route("/", post(routes::staff::create_staff));

    let appointment_routes =
        Router::new().route("/", get(routes::appointments::list_appointments));

    let transaction_routes =
        Router::new().route("/", post(routes::transactions::create_transaction));

    // Build complete v1 API with the principal layer
    let v1_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/clients", client_routes)
        .nest("/locations", location_routes)
        .nest("/staff", staff_routes)
        .nest("/appointments", appointment_routes)
        .nest("/transactions", transaction_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            principal_layer,
        ));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    // Combine all routes with middleware stack
    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// Principal extraction middleware
///
/// Validates the Bearer token when one is present and injects the resulting
/// `Principal` into request extensions. Requests without an Authorization
/// header pass through anonymously; a header that is present but invalid is
/// rejected.
async fn principal_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = auth::bearer_token(req.headers())?.map(str::to_string);

    if let Some(token) = token {
        let claims = jwt::validate_access_token(&token, state.jwt_secret())?;
        let principal = auth::principal_from_claims(&claims);
        req.extensions_mut().insert(principal);
    }

    Ok(next.run(req).await)
}
