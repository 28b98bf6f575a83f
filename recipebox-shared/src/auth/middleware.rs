//! Bearer-token authentication middleware for Axum.
//!
//! The middleware extracts the token from the `Authorization: Bearer ...`
//! header, validates it against the `auth_tokens` table, and injects an
//! [`AuthContext`] into request extensions. Handlers behind the middleware
//! extract it with Axum's `Extension` extractor and use the user ID to
//! scope every store query — there is no ambient "current user" outside
//! this explicit context.
//!
//! # Example
//!
//! ```no_run
//! use axum::{Extension, Router, middleware, routing::get};
//! use recipebox_shared::auth::middleware::{bearer_auth_middleware, AuthContext};
//! use sqlx::PgPool;
//!
//! async fn handler(Extension(auth): Extension<AuthContext>) -> String {
//!     format!("Hello, user {}!", auth.user_id)
//! }
//!
//! fn protected(pool: PgPool) -> Router {
//!     Router::new()
//!         .route("/me", get(handler))
//!         .layer(middleware::from_fn(move |req, next| {
//!             bearer_auth_middleware(pool.clone(), req, next)
//!         }))
//! }
//! ```

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::auth_token::AuthToken;

/// Authentication context added to request extensions after a successful
/// token check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,
}

impl AuthContext {
    /// Creates an auth context for a validated user.
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

/// Error type for the authentication middleware.
///
/// All failures map to 401: a missing header, a malformed header, and an
/// unknown token are deliberately indistinguishable to the caller.
#[derive(Debug)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Header present but not a Bearer token, or token unknown/revoked
    InvalidToken,

    /// Database error during token lookup
    DatabaseError(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "Missing credentials").into_response()
            }
            AuthError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "Invalid token").into_response()
            }
            AuthError::DatabaseError(msg) => {
                tracing::error!("Token lookup failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Bearer-token authentication middleware.
///
/// Validates the token with a single database lookup (which also bumps
/// `last_used_at`) and adds [`AuthContext`] to the request on success.
///
/// # Errors
///
/// Returns 401 Unauthorized when the header is missing, malformed, or the
/// token does not resolve to an active user.
pub async fn bearer_auth_middleware(
    pool: PgPool,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidToken)?;

    let user_id = AuthToken::validate(&pool, token)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?
        .ok_or(AuthError::InvalidToken)?;

    req.extensions_mut().insert(AuthContext::new(user_id));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_context_new() {
        let user_id = Uuid::new_v4();
        let context = AuthContext::new(user_id);
        assert_eq!(context.user_id, user_id);
    }

    #[test]
    fn test_auth_error_into_response() {
        let response = AuthError::MissingCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = AuthError::InvalidToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = AuthError::DatabaseError("test".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
