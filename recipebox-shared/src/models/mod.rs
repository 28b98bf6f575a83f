//! Database models for RecipeBox.
//!
//! Each model owns its CRUD operations as inherent async methods taking a
//! `&PgPool`. Owner-scoped resources (tags, ingredients, recipes) only
//! expose queries that filter on the owning user; there is no unscoped
//! read path for them.
//!
//! # Models
//!
//! - `user`: User accounts
//! - `auth_token`: Opaque bearer tokens, one per user
//! - `tag`: User-owned recipe tags
//! - `ingredient`: User-owned ingredients
//! - `recipe`: Recipes plus their ingredient/tag link sets

pub mod auth_token;
pub mod ingredient;
pub mod recipe;
pub mod tag;
pub mod user;
