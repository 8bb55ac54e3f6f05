/// Authentication middleware support for Axum
///
/// The API layer validates `Authorization: Bearer` headers and injects a
/// [`Principal`] into request extensions. Reads stay public — a missing
/// header yields no principal and the access filters fall back to public
/// read — but a header that is present and invalid is rejected.
///
/// # Example
///
/// ```no_run
/// use axum::Extension;
/// use glowdesk_shared::access::Principal;
///
/// async fn handler(principal: Option<Extension<Principal>>) -> String {
///     match principal {
///         Some(Extension(p)) => format!("Hello, {}", p.id),
///         None => "Hello, guest".to_string(),
///     }
/// }
/// ```

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::access::{Principal, Role};

use super::jwt::Claims;

/// Error type for authentication middleware
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Missing authorization header where one is required
    #[error("Missing credentials")]
    MissingCredentials,

    /// Invalid authorization header format
    #[error("Invalid authorization header: {0}")]
    InvalidFormat(String),

    /// Token validation failed
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "Missing credentials").into_response()
            }
            AuthError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
        }
    }
}

/// Extracts the bearer token from request headers, if any.
///
/// Returns `Ok(None)` when no Authorization header is present (anonymous
/// caller), an error when the header exists but is not a bearer token.
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidFormat("Authorization header is not valid UTF-8".to_string()))?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    Ok(Some(token))
}

/// Builds a [`Principal`] from validated token claims.
///
/// The role tag is parsed here, once, at the boundary; everything downstream
/// works with the closed role set.
pub fn principal_from_claims(claims: &Claims) -> Principal {
    Principal {
        id: claims.sub,
        role: Role::parse(&claims.role),
        locations: claims.locations.clone(),
        email: claims.email.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::TokenType;
    use axum::http::HeaderValue;
    use uuid::Uuid;

    #[test]
    fn test_bearer_token_absent() {
        let headers = HeaderMap::new();
        assert!(bearer_token(&headers).unwrap().is_none());
    }

    #[test]
    fn test_bearer_token_present() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(bearer_token(&headers).unwrap(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_non_bearer_header_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert!(bearer_token(&headers).is_err());
    }

    #[test]
    fn test_principal_from_claims_parses_role() {
        let claims = Claims::new(
            Uuid::new_v4(),
            "SALES",
            vec!["online".to_string()],
            Some("sales@example.com".to_string()),
            TokenType::Access,
        );

        let principal = principal_from_claims(&claims);
        assert_eq!(principal.role, Role::Sales);
        assert_eq!(principal.locations, vec!["online".to_string()]);
        assert_eq!(principal.email.as_deref(), Some("sales@example.com"));
    }

    #[test]
    fn test_unknown_role_claim_falls_back() {
        let claims = Claims::new(Uuid::new_v4(), "wizard", vec![], None, TokenType::Access);
        assert_eq!(principal_from_claims(&claims).role, Role::Client);
    }
}
