//! Recipe model and database operations.
//!
//! A recipe references sets of ingredients and tags through the
//! `recipe_ingredients` and `recipe_tags` join tables. Creating or
//! updating a recipe replaces those link sets atomically in a database
//! transaction. As with tags and ingredients, every read and write is
//! scoped to the owning user.
//!
//! The referenced ingredient/tag rows are not required to belong to the
//! recipe's owner; the link tables only enforce referential integrity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// User-owned recipe.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Recipe {
    /// Unique recipe ID
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Recipe title
    pub title: String,

    /// Preparation time in minutes
    pub time_minutes: i32,

    /// Price estimate
    pub price: f64,

    /// Relative storage path of the uploaded image, if any
    pub image: Option<String>,

    /// When the recipe was created
    pub created_at: DateTime<Utc>,

    /// When the recipe was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecipe {
    /// Owning user
    pub user_id: Uuid,

    /// Recipe title
    pub title: String,

    /// Preparation time in minutes
    pub time_minutes: i32,

    /// Price estimate
    pub price: f64,

    /// Ingredients to link
    pub ingredient_ids: Vec<Uuid>,

    /// Tags to link
    pub tag_ids: Vec<Uuid>,
}

/// Input for updating a recipe. Only non-None fields are touched;
/// providing an id set replaces the whole set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRecipe {
    /// New title
    pub title: Option<String>,

    /// New preparation time
    pub time_minutes: Option<i32>,

    /// New price
    pub price: Option<f64>,

    /// Replacement ingredient set
    pub ingredient_ids: Option<Vec<Uuid>>,

    /// Replacement tag set
    pub tag_ids: Option<Vec<Uuid>>,
}

impl Recipe {
    /// Creates a recipe with its ingredient and tag links in one
    /// transaction.
    pub async fn create(pool: &PgPool, data: CreateRecipe) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (user_id, title, time_minutes, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, title, time_minutes, price, image, created_at, updated_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.title)
        .bind(data.time_minutes)
        .bind(data.price)
        .fetch_one(&mut *tx)
        .await?;

        link_ingredients(&mut tx, recipe.id, &data.ingredient_ids).await?;
        link_tags(&mut tx, recipe.id, &data.tag_ids).await?;

        tx.commit().await?;

        Ok(recipe)
    }

    /// Lists a user's recipes in creation order.
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let recipes = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, user_id, title, time_minutes, price, image, created_at, updated_at
            FROM recipes
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(recipes)
    }

    /// Finds a recipe by ID within a user's scope.
    ///
    /// Another user's recipe is indistinguishable from a missing one.
    pub async fn find_for_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, user_id, title, time_minutes, price, image, created_at, updated_at
            FROM recipes
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(recipe)
    }

    /// Updates a recipe within a user's scope. Scalar fields are patched;
    /// ingredient/tag sets, when present, are replaced wholesale. Runs in
    /// a transaction.
    ///
    /// Returns the updated recipe, or None when the recipe is not in the
    /// user's scope.
    pub async fn update_for_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        data: UpdateRecipe,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let mut query =
            String::from("UPDATE recipes SET updated_at = NOW()");
        let mut bind_count = 2;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.time_minutes.is_some() {
            bind_count += 1;
            query.push_str(&format!(", time_minutes = ${}", bind_count));
        }
        if data.price.is_some() {
            bind_count += 1;
            query.push_str(&format!(", price = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 AND user_id = $2 RETURNING id, user_id, title, time_minutes, \
             price, image, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Recipe>(&query).bind(id).bind(user_id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(time_minutes) = data.time_minutes {
            q = q.bind(time_minutes);
        }
        if let Some(price) = data.price {
            q = q.bind(price);
        }

        let recipe = match q.fetch_optional(&mut *tx).await? {
            Some(recipe) => recipe,
            None => return Ok(None),
        };

        if let Some(ingredient_ids) = data.ingredient_ids {
            sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
                .bind(recipe.id)
                .execute(&mut *tx)
                .await?;
            link_ingredients(&mut tx, recipe.id, &ingredient_ids).await?;
        }

        if let Some(tag_ids) = data.tag_ids {
            sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = $1")
                .bind(recipe.id)
                .execute(&mut *tx)
                .await?;
            link_tags(&mut tx, recipe.id, &tag_ids).await?;
        }

        tx.commit().await?;

        Ok(Some(recipe))
    }

    /// Deletes a recipe within a user's scope. Link rows cascade.
    pub async fn delete_for_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Records the storage path of an uploaded image, within the user's
    /// scope.
    pub async fn set_image_for_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        image: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            UPDATE recipes
            SET image = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, time_minutes, price, image, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(image)
        .fetch_optional(pool)
        .await?;

        Ok(recipe)
    }

    /// Returns the IDs of ingredients linked to a recipe.
    pub async fn ingredient_ids(pool: &PgPool, recipe_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT ingredient_id FROM recipe_ingredients WHERE recipe_id = $1",
        )
        .bind(recipe_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Returns the IDs of tags linked to a recipe.
    pub async fn tag_ids(pool: &PgPool, recipe_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        let rows: Vec<(Uuid,)> =
            sqlx::query_as("SELECT tag_id FROM recipe_tags WHERE recipe_id = $1")
                .bind(recipe_id)
                .fetch_all(pool)
                .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}

async fn link_ingredients(
    tx: &mut Transaction<'_, Postgres>,
    recipe_id: Uuid,
    ingredient_ids: &[Uuid],
) -> Result<(), sqlx::Error> {
    if ingredient_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO recipe_ingredients (recipe_id, ingredient_id)
        SELECT $1, UNNEST($2::uuid[])
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(recipe_id)
    .bind(ingredient_ids)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn link_tags(
    tx: &mut Transaction<'_, Postgres>,
    recipe_id: Uuid,
    tag_ids: &[Uuid],
) -> Result<(), sqlx::Error> {
    if tag_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO recipe_tags (recipe_id, tag_id)
        SELECT $1, UNNEST($2::uuid[])
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(recipe_id)
    .bind(tag_ids)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_recipe_default_is_noop() {
        let update = UpdateRecipe::default();
        assert!(update.title.is_none());
        assert!(update.time_minutes.is_none());
        assert!(update.price.is_none());
        assert!(update.ingredient_ids.is_none());
        assert!(update.tag_ids.is_none());
    }

    // Database operations are covered by the API integration tests.
}
