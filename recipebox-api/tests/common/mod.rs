//! Common test utilities for integration tests.
//!
//! Provides a [`TestContext`] with a migrated database, a ready-to-call
//! router, and a pre-registered user holding a valid bearer token. Tests
//! drive the router directly through `tower::Service`, so no listening
//! socket is needed.

use axum::response::Response;
use recipebox_api::app::{build_router, AppState};
use recipebox_api::config::Config;
use recipebox_shared::auth::password::hash_password;
use recipebox_shared::models::auth_token::AuthToken;
use recipebox_shared::models::user::{CreateUser, User};
use sqlx::PgPool;
use uuid::Uuid;

/// Password used for all test accounts
pub const TEST_PASSWORD: &str = "testpass123";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    pub user: User,
    pub token: String,
}

impl TestContext {
    /// Creates a new test context with a fresh user and token
    pub async fn new() -> anyhow::Result<Self> {
        // Load test configuration
        let config = Config::from_env()?;

        // Connect to database
        let db = PgPool::connect(&config.database.url).await?;

        // Run migrations (path relative to Cargo.toml, not this file)
        sqlx::migrate!("../migrations").run(&db).await?;

        // Create test user with a real password hash and issue a token
        let (user, token) = create_user_with_token(&db, "Test User").await?;

        // Build app
        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            config,
            user,
            token,
        })
    }

    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Cleans up test data (tokens and owned resources cascade)
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        User::delete(&self.db, self.user.id).await?;
        Ok(())
    }
}

/// Generates an email no other test run can collide with
pub fn unique_email() -> String {
    format!("test-{}@example.com", Uuid::new_v4())
}

/// Creates a user with a hashed [`TEST_PASSWORD`] and a valid token
pub async fn create_user_with_token(db: &PgPool, name: &str) -> anyhow::Result<(User, String)> {
    let user = User::create(
        db,
        CreateUser {
            email: unique_email(),
            password_hash: hash_password(TEST_PASSWORD)?,
            name: name.to_string(),
        },
    )
    .await?;

    let (_, token) = AuthToken::issue(db, user.id).await?;

    Ok((user, token))
}

/// Reads a response body as JSON
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body is not valid JSON")
}
