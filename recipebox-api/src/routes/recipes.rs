//! Recipe endpoints.
//!
//! Recipes carry a title, timing, price, optional uploaded image, and
//! sets of linked ingredient and tag IDs. All reads and writes are scoped
//! to the authenticated user; another user's recipe answers 404.
//!
//! # Endpoints
//!
//! - `GET /recipe/recipes` - List own recipes
//! - `POST /recipe/recipes` - Create a recipe
//! - `GET /recipe/recipes/:id` - Fetch one recipe
//! - `PUT/PATCH /recipe/recipes/:id` - Update a recipe
//! - `DELETE /recipe/recipes/:id` - Delete a recipe
//! - `POST /recipe/recipes/:id/upload-image` - Attach an image (multipart)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};
use recipebox_shared::{
    auth::middleware::AuthContext,
    models::recipe::{CreateRecipe, Recipe, UpdateRecipe},
    uploads,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Recipe creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecipeRequest {
    /// Recipe title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Preparation time in minutes
    #[validate(range(min = 1, message = "Time must be at least 1 minute"))]
    pub time_minutes: i32,

    /// Price estimate
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,

    /// Ingredient IDs to link
    #[serde(default)]
    pub ingredients: Vec<Uuid>,

    /// Tag IDs to link
    #[serde(default)]
    pub tags: Vec<Uuid>,
}

/// Recipe update request. Absent fields are left unchanged; a present
/// `ingredients` or `tags` array replaces the whole set.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRecipeRequest {
    /// New title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    /// New preparation time
    #[validate(range(min = 1, message = "Time must be at least 1 minute"))]
    pub time_minutes: Option<i32>,

    /// New price
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: Option<f64>,

    /// Replacement ingredient set
    pub ingredients: Option<Vec<Uuid>>,

    /// Replacement tag set
    pub tags: Option<Vec<Uuid>>,
}

/// Recipe as exposed over the API
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeResponse {
    /// Recipe ID
    pub id: Uuid,

    /// Recipe title
    pub title: String,

    /// Preparation time in minutes
    pub time_minutes: i32,

    /// Price estimate
    pub price: f64,

    /// Relative storage path of the uploaded image, if any
    pub image: Option<String>,

    /// Linked ingredient IDs
    pub ingredients: Vec<Uuid>,

    /// Linked tag IDs
    pub tags: Vec<Uuid>,
}

impl RecipeResponse {
    /// Assembles the API view of a recipe, including its link sets.
    async fn load(pool: &PgPool, recipe: Recipe) -> Result<Self, sqlx::Error> {
        let ingredients = Recipe::ingredient_ids(pool, recipe.id).await?;
        let tags = Recipe::tag_ids(pool, recipe.id).await?;

        Ok(Self {
            id: recipe.id,
            title: recipe.title,
            time_minutes: recipe.time_minutes,
            price: recipe.price,
            image: recipe.image,
            ingredients,
            tags,
        })
    }
}

/// List the authenticated user's recipes, oldest first.
pub async fn list_recipes(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<RecipeResponse>>> {
    let recipes = Recipe::list_for_user(&state.db, auth.user_id).await?;

    let mut out = Vec::with_capacity(recipes.len());
    for recipe in recipes {
        out.push(RecipeResponse::load(&state.db, recipe).await?);
    }

    Ok(Json(out))
}

/// Create a recipe owned by the authenticated user.
pub async fn create_recipe(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateRecipeRequest>,
) -> ApiResult<(StatusCode, Json<RecipeResponse>)> {
    req.validate()?;

    let recipe = Recipe::create(
        &state.db,
        CreateRecipe {
            user_id: auth.user_id,
            title: req.title,
            time_minutes: req.time_minutes,
            price: req.price,
            ingredient_ids: req.ingredients,
            tag_ids: req.tags,
        },
    )
    .await?;

    let response = RecipeResponse::load(&state.db, recipe).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Fetch one of the authenticated user's recipes.
pub async fn get_recipe(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<RecipeResponse>> {
    let recipe = Recipe::find_for_user(&state.db, id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Recipe not found".to_string()))?;

    Ok(Json(RecipeResponse::load(&state.db, recipe).await?))
}

/// Update one of the authenticated user's recipes.
///
/// Handles both PUT and PATCH; only the provided fields change.
pub async fn update_recipe(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRecipeRequest>,
) -> ApiResult<Json<RecipeResponse>> {
    req.validate()?;

    let recipe = Recipe::update_for_user(
        &state.db,
        id,
        auth.user_id,
        UpdateRecipe {
            title: req.title,
            time_minutes: req.time_minutes,
            price: req.price,
            ingredient_ids: req.ingredients,
            tag_ids: req.tags,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Recipe not found".to_string()))?;

    Ok(Json(RecipeResponse::load(&state.db, recipe).await?))
}

/// Delete one of the authenticated user's recipes.
pub async fn delete_recipe(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = Recipe::delete_for_user(&state.db, id, auth.user_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Recipe not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Attach an image to a recipe.
///
/// Expects a multipart form with an `image` field. The file lands under
/// the media root with a generated name; the relative path is stored on
/// the recipe and echoed back.
///
/// # Endpoint
///
/// ```text
/// POST /recipe/recipes/:id/upload-image
/// Authorization: Bearer <token>
/// Content-Type: multipart/form-data
/// ```
pub async fn upload_image(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> ApiResult<Json<RecipeResponse>> {
    // Resolve scope before touching the filesystem
    Recipe::find_for_user(&state.db, id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Recipe not found".to_string()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let original_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::BadRequest("Image field has no filename".to_string()))?;

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;

        if data.is_empty() {
            return Err(ApiError::BadRequest("Uploaded image is empty".to_string()));
        }

        let relative_path = uploads::recipe_image_path(&original_name);
        let destination = std::path::Path::new(&state.config.media.root).join(&relative_path);

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&destination, &data).await?;

        let recipe = Recipe::set_image_for_user(&state.db, id, auth.user_id, &relative_path)
            .await?
            .ok_or_else(|| ApiError::NotFound("Recipe not found".to_string()))?;

        return Ok(Json(RecipeResponse::load(&state.db, recipe).await?));
    }

    Err(ApiError::BadRequest(
        "Multipart body has no image field".to_string(),
    ))
}
