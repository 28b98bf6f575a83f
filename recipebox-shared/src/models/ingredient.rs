//! Ingredient model and database operations.
//!
//! Same ownership contract as tags: reads and writes are always scoped to
//! the owning user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// User-owned ingredient.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ingredient {
    /// Unique ingredient ID
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Ingredient name
    pub name: String,

    /// When the ingredient was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating an ingredient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIngredient {
    /// Owning user
    pub user_id: Uuid,

    /// Ingredient name
    pub name: String,
}

impl Ingredient {
    /// Creates an ingredient owned by the given user.
    pub async fn create(pool: &PgPool, data: CreateIngredient) -> Result<Self, sqlx::Error> {
        let ingredient = sqlx::query_as::<_, Ingredient>(
            r#"
            INSERT INTO ingredients (user_id, name)
            VALUES ($1, $2)
            RETURNING id, user_id, name, created_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.name)
        .fetch_one(pool)
        .await?;

        Ok(ingredient)
    }

    /// Lists a user's ingredients in reverse-name order.
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let ingredients = sqlx::query_as::<_, Ingredient>(
            r#"
            SELECT id, user_id, name, created_at
            FROM ingredients
            WHERE user_id = $1
            ORDER BY name DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(ingredients)
    }

    /// Lists a user's ingredients that are used by at least one recipe.
    ///
    /// An ingredient used by several recipes appears exactly once.
    pub async fn list_assigned_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let ingredients = sqlx::query_as::<_, Ingredient>(
            r#"
            SELECT DISTINCT i.id, i.user_id, i.name, i.created_at
            FROM ingredients i
            INNER JOIN recipe_ingredients ri ON ri.ingredient_id = i.id
            WHERE i.user_id = $1
            ORDER BY i.name DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(ingredients)
    }

    /// Finds an ingredient by ID within a user's scope.
    pub async fn find_for_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let ingredient = sqlx::query_as::<_, Ingredient>(
            r#"
            SELECT id, user_id, name, created_at
            FROM ingredients
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(ingredient)
    }

    /// Deletes an ingredient within a user's scope.
    pub async fn delete_for_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ingredients WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
