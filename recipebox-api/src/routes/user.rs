//! User endpoints.
//!
//! Registration, token issuance, and own-profile management.
//!
//! # Endpoints
//!
//! - `POST /user/create` - Register a new user
//! - `POST /user/token` - Exchange credentials for an auth token
//! - `GET /user/me` - Current user's profile
//! - `PATCH /user/me` / `PUT /user/me` - Update name and/or password

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use recipebox_shared::{
    auth::{middleware::AuthContext, password},
    models::{
        auth_token::AuthToken,
        user::{CreateUser, UpdateUser, User},
    },
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 5, message = "Password must be at least 5 characters"))]
    pub password: String,

    /// Display name
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: String,
}

/// Public view of a user account.
///
/// IDs, flags, and hashes are deliberately not exposed.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    /// Email address
    pub email: String,

    /// Display name
    pub name: String,
}

/// Token request.
///
/// Fields are optional so a missing field reaches the handler and gets the
/// same generic 400 as a wrong password, instead of a body-decode error.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    /// Email address
    pub email: Option<String>,

    /// Password
    pub password: Option<String>,
}

/// Token response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Opaque bearer token. Shown only here; store it client-side.
    pub token: String,
}

/// Own-profile update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMeRequest {
    /// New display name
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: Option<String>,

    /// New password
    #[validate(length(min = 5, message = "Password must be at least 5 characters"))]
    pub password: Option<String>,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /user/create
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "testpass",
///   "name": "Test Name"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed, or the email is already taken
/// - `500 Internal Server Error`: Server error
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    req.validate()?;

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            password_hash,
            name: req.name,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            email: user.email,
            name: user.name,
        }),
    ))
}

/// Exchange credentials for an auth token
///
/// Every failure mode (missing field, unknown email, wrong password,
/// deactivated account) returns the same generic 400, so the endpoint
/// never reveals which part of the credentials was wrong.
///
/// Re-issuing replaces any previous token for the user.
///
/// # Endpoint
///
/// ```text
/// POST /user/token
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "testpass"
/// }
/// ```
pub async fn create_token(
    State(state): State<AppState>,
    Json(req): Json<TokenRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let rejected = || {
        ApiError::BadRequest("Unable to authenticate with provided credentials".to_string())
    };

    let email = req.email.filter(|e| !e.is_empty()).ok_or_else(rejected)?;
    let plaintext = req.password.filter(|p| !p.is_empty()).ok_or_else(rejected)?;

    let user = User::find_by_email(&state.db, &email)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(rejected)?;

    if !password::verify_password(&plaintext, &user.password_hash)? {
        return Err(rejected());
    }

    User::update_last_login(&state.db, user.id).await?;

    let (_, token) = AuthToken::issue(&state.db, user.id)
        .await
        .map_err(|e| ApiError::InternalError(format!("Token issuance failed: {}", e)))?;

    Ok(Json(TokenResponse { token }))
}

/// Current user's profile
///
/// # Endpoint
///
/// ```text
/// GET /user/me
/// Authorization: Bearer <token>
/// ```
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<UserResponse>> {
    // Token validation already proved the user exists and is active
    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::InternalError("Authenticated user missing".to_string()))?;

    Ok(Json(UserResponse {
        email: user.email,
        name: user.name,
    }))
}

/// Update the current user's name and/or password
///
/// Handles both PATCH and PUT; absent fields are left unchanged. A new
/// password is re-hashed before storage.
///
/// # Endpoint
///
/// ```text
/// PATCH /user/me
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// {
///   "name": "New Name",
///   "password": "newpassword"
/// }
/// ```
pub async fn update_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateMeRequest>,
) -> ApiResult<Json<UserResponse>> {
    req.validate()?;

    let password_hash = match req.password {
        Some(ref plaintext) => Some(password::hash_password(plaintext)?),
        None => None,
    };

    let user = User::update(
        &state.db,
        auth.user_id,
        UpdateUser {
            email: None,
            password_hash,
            name: req.name,
        },
    )
    .await?
    .ok_or_else(|| ApiError::InternalError("Authenticated user missing".to_string()))?;

    Ok(Json(UserResponse {
        email: user.email,
        name: user.name,
    }))
}
