//! Tag model and database operations.
//!
//! Tags are owner-scoped: every query filters on the owning user, so a
//! tag belonging to someone else is simply absent from results rather
//! than producing an authorization error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// User-owned recipe tag.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    /// Unique tag ID
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Tag name
    pub name: String,

    /// When the tag was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a tag. The owner comes from the authenticated
/// request context, never from the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTag {
    /// Owning user
    pub user_id: Uuid,

    /// Tag name
    pub name: String,
}

impl Tag {
    /// Creates a tag owned by the given user.
    pub async fn create(pool: &PgPool, data: CreateTag) -> Result<Self, sqlx::Error> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO tags (user_id, name)
            VALUES ($1, $2)
            RETURNING id, user_id, name, created_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.name)
        .fetch_one(pool)
        .await?;

        Ok(tag)
    }

    /// Lists a user's tags in reverse-name order.
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT id, user_id, name, created_at
            FROM tags
            WHERE user_id = $1
            ORDER BY name DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tags)
    }

    /// Lists a user's tags that are attached to at least one recipe.
    ///
    /// A tag attached to several recipes still appears once.
    pub async fn list_assigned_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT DISTINCT t.id, t.user_id, t.name, t.created_at
            FROM tags t
            INNER JOIN recipe_tags rt ON rt.tag_id = t.id
            WHERE t.user_id = $1
            ORDER BY t.name DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tags)
    }

    /// Finds a tag by ID within a user's scope.
    pub async fn find_for_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            SELECT id, user_id, name, created_at
            FROM tags
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(tag)
    }

    /// Deletes a tag within a user's scope.
    pub async fn delete_for_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
