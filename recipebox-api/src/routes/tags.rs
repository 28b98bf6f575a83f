//! Tag endpoints.
//!
//! Tags are owner-scoped labels attachable to recipes. Another user's
//! tags never appear in listings and answer 404 when addressed by ID.
//!
//! # Endpoints
//!
//! - `GET /recipe/tags` - List own tags (`?assigned_only=1` keeps only
//!   tags attached to at least one recipe)
//! - `POST /recipe/tags` - Create a tag
//! - `GET /recipe/tags/:id` - Fetch one tag
//! - `DELETE /recipe/tags/:id` - Delete a tag

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
    models::tag::{CreateTag, Tag},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// List query parameters
#[derive(Debug, Deserialize)]
pub struct ListTagsParams {
    /// When 1, only tags assigned to at least one recipe are returned
    pub assigned_only: Option<u8>,
}

/// Tag creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTagRequest {
    /// Tag name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
}

/// Tag as exposed over the API
#[derive(Debug, Serialize, Deserialize)]
pub struct TagResponse {
    /// Tag ID
    pub id: Uuid,

    /// Tag name
    pub name: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

/// List the authenticated user's tags, in reverse-name order.
pub async fn list_tags(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<ListTagsParams>,
) -> ApiResult<Json<Vec<TagResponse>>> {
    let tags = if params.assigned_only == Some(1) {
        Tag::list_assigned_for_user(&state.db, auth.user_id).await?
    } else {
        Tag::list_for_user(&state.db, auth.user_id).await?
    };

    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}

/// Create a tag owned by the authenticated user.
pub async fn create_tag(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTagRequest>,
) -> ApiResult<(StatusCode, Json<TagResponse>)> {
    req.validate()?;

    let tag = Tag::create(
        &state.db,
        CreateTag {
            user_id: auth.user_id,
            name: req.name,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(tag.into())))
}

/// Fetch one of the authenticated user's tags.
pub async fn get_tag(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TagResponse>> {
    let tag = Tag::find_for_user(&state.db, id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Tag not found".to_string()))?;

    Ok(Json(tag.into()))
}

/// Delete one of the authenticated user's tags.
pub async fn delete_tag(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = Tag::delete_for_user(&state.db, id, auth.user_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Tag not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
