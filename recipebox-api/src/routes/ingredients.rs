//! Ingredient endpoints.
//!
//! Ingredients mirror tags: owner-scoped, attachable to recipes, and
//! invisible across user boundaries.
//!
//! # Endpoints
//!
//! - `GET /recipe/ingredients` - List own ingredients (`?assigned_only=1`
//!   keeps only ingredients attached to at least one recipe)
//! - `POST /recipe/ingredients` - Create an ingredient
//! - `GET /recipe/ingredients/:id` - Fetch one ingredient
//! - `DELETE /recipe/ingredients/:id` - Delete an ingredient

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use recipebox_shared::{
    auth::middleware::AuthContext,
    models::ingredient::{CreateIngredient, Ingredient},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// List query parameters
#[derive(Debug, Deserialize)]
pub struct ListIngredientsParams {
    /// When 1, only ingredients used by at least one recipe are returned
    pub assigned_only: Option<u8>,
}

/// Ingredient creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateIngredientRequest {
    /// Ingredient name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
}

/// Ingredient as exposed over the API
#[derive(Debug, Serialize, Deserialize)]
pub struct IngredientResponse {
    /// Ingredient ID
    pub id: Uuid,

    /// Ingredient name
    pub name: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
        }
    }
}

/// List the authenticated user's ingredients, in reverse-name order.
pub async fn list_ingredients(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<ListIngredientsParams>,
) -> ApiResult<Json<Vec<IngredientResponse>>> {
    let ingredients = if params.assigned_only == Some(1) {
        Ingredient::list_assigned_for_user(&state.db, auth.user_id).await?
    } else {
        Ingredient::list_for_user(&state.db, auth.user_id).await?
    };

    Ok(Json(
        ingredients
            .into_iter()
            .map(IngredientResponse::from)
            .collect(),
    ))
}

/// Create an ingredient owned by the authenticated user.
pub async fn create_ingredient(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateIngredientRequest>,
) -> ApiResult<(StatusCode, Json<IngredientResponse>)> {
    req.validate()?;

    let ingredient = Ingredient::create(
        &state.db,
        CreateIngredient {
            user_id: auth.user_id,
            name: req.name,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(ingredient.into())))
}

/// Fetch one of the authenticated user's ingredients.
pub async fn get_ingredient(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<IngredientResponse>> {
    let ingredient = Ingredient::find_for_user(&state.db, id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Ingredient not found".to_string()))?;

    Ok(Json(ingredient.into()))
}

/// Delete one of the authenticated user's ingredients.
pub async fn delete_ingredient(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = Ingredient::delete_for_user(&state.db, id, auth.user_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Ingredient not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
