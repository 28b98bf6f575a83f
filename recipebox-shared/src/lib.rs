//! # RecipeBox Shared Library
//!
//! Shared types and business logic used by the RecipeBox API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their CRUD operations
//! - `auth`: Password hashing and bearer-token authentication
//! - `db`: Connection pool and migration runner
//! - `uploads`: Storage path generation for uploaded files

pub mod auth;
pub mod db;
pub mod models;
pub mod uploads;

/// Current version of the RecipeBox shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
