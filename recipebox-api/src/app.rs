//! Application state and router builder.
//!
//! This module defines the shared application state and provides
//! a function to build the Axum router with all routes and middleware.
//!
//! # Example
//!
//! ```no_run
//! use recipebox_api::{app::AppState, config::Config};
//! use sqlx::PgPool;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let pool = PgPool::connect(&config.database.url).await?;
//! let state = AppState::new(pool, config);
//! let app = recipebox_api::app::build_router(state);
//! # Ok(())
//! # }
//! ```

use crate::config::Config;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use recipebox_shared::auth::middleware::{bearer_auth_middleware, AuthError};
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
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// The router is organized as follows:
/// ```text
/// /
/// ├── /health                        # Health check (public)
/// ├── /user/
/// │   ├── POST /create               # Register (public)
/// │   ├── POST /token                # Obtain auth token (public)
/// │   └── GET/PATCH/PUT /me          # Own profile (authenticated)
/// └── /recipe/                       # All authenticated
///     ├── GET/POST /tags
///     ├── GET/DELETE /tags/:id
///     ├── GET/POST /ingredients
///     ├── GET/DELETE /ingredients/:id
///     ├── GET/POST /recipes
///     ├── GET/PUT/PATCH/DELETE /recipes/:id
///     └── POST /recipes/:id/upload-image
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Authentication (per-route basis)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // User registration and token issuance (public, no auth required)
    let user_public = Router::new()
        .route("/create", post(routes::user::create_user))
        .route("/token", post(routes::user::create_token));

    // Own-profile routes (require bearer token). POST is deliberately not
    // registered on /me, so Axum answers it with 405.
    let user_protected = Router::new()
        .route(
            "/me",
            get(routes::user::me)
                .patch(routes::user::update_me)
                .put(routes::user::update_me),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    // Recipe-domain routes (all require bearer token)
    let recipe_routes = Router::new()
        .route(
            "/tags",
            get(routes::tags::list_tags).post(routes::tags::create_tag),
        )
        .route(
            "/tags/:id",
            get(routes::tags::get_tag).delete(routes::tags::delete_tag),
        )
        .route(
            "/ingredients",
            get(routes::ingredients::list_ingredients).post(routes::ingredients::create_ingredient),
        )
        .route(
            "/ingredients/:id",
            get(routes::ingredients::get_ingredient)
                .delete(routes::ingredients::delete_ingredient),
        )
        .route(
            "/recipes",
            get(routes::recipes::list_recipes).post(routes::recipes::create_recipe),
        )
        .route(
            "/recipes/:id",
            get(routes::recipes::get_recipe)
                .put(routes::recipes::update_recipe)
                .patch(routes::recipes::update_recipe)
                .delete(routes::recipes::delete_recipe),
        )
        .route(
            "/recipes/:id/upload-image",
            post(routes::recipes::upload_image),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
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
                Method::PATCH,
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
        .nest("/user", user_public.merge(user_protected))
        .nest("/recipe", recipe_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Bearer-token authentication middleware layer.
///
/// Delegates to the shared token validator, which injects an `AuthContext`
/// into request extensions on success.
async fn bearer_auth_layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    bearer_auth_middleware(state.db.clone(), req, next).await
}
