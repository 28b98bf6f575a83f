//! API route handlers.
//!
//! Route modules, grouped by URL prefix:
//!
//! - `health`: GET /health
//! - `user`: /user endpoints (registration, token, own profile)
//! - `tags`: /recipe/tags endpoints
//! - `ingredients`: /recipe/ingredients endpoints
//! - `recipes`: /recipe/recipes endpoints

pub mod health;
pub mod ingredients;
pub mod recipes;
pub mod tags;
pub mod user;
