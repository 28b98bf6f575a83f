//! Authentication utilities: password hashing and bearer-token middleware.

pub mod middleware;
pub mod password;
