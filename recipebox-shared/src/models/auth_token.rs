//! Opaque bearer token model.
//!
//! Each user holds at most one token. The plaintext is generated at login,
//! returned to the client once, and only its SHA-256 hash is persisted.
//! Re-issuing a token for a user replaces the previous one, since the old
//! plaintext cannot be recovered from the stored hash.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE auth_tokens (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     user_id UUID NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
//!     token_prefix VARCHAR(10) NOT NULL,
//!     token_hash VARCHAR(64) NOT NULL UNIQUE,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     last_used_at TIMESTAMPTZ
//! );
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

/// Stored token record. Never contains the plaintext token.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuthToken {
    /// Unique token ID
    pub id: Uuid,

    /// User this token authenticates
    pub user_id: Uuid,

    /// First 10 characters of the token, for display/debugging
    pub token_prefix: String,

    /// SHA-256 hash of the full token
    pub token_hash: String,

    /// When the token was issued
    pub created_at: DateTime<Utc>,

    /// When the token last authenticated a request
    pub last_used_at: Option<DateTime<Utc>>,
}

impl AuthToken {
    /// Generates a secure random token.
    ///
    /// Format: `rcpb_{40_random_alphanumeric_chars}`
    ///
    /// # Example
    ///
    /// ```
    /// use recipebox_shared::models::auth_token::AuthToken;
    ///
    /// let token = AuthToken::generate();
    /// assert!(token.starts_with("rcpb_"));
    /// assert_eq!(token.len(), 45);
    /// ```
    pub fn generate() -> String {
        use rand::Rng;
        const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
        let mut rng = rand::thread_rng();

        let random: String = (0..40)
            .map(|_| {
                let idx = rng.gen_range(0..CHARSET.len());
                CHARSET[idx] as char
            })
            .collect();

        format!("rcpb_{}", random)
    }

    /// Hashes a token with SHA-256 for storage and lookup.
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Extracts the display prefix from a token (first 10 chars).
    pub fn extract_prefix(token: &str) -> String {
        token.chars().take(10).collect()
    }

    /// Issues a token for a user, replacing any previous one.
    ///
    /// Returns the stored record and the plaintext token. The plaintext is
    /// only available here; persist-side we keep the hash alone.
    pub async fn issue(pool: &PgPool, user_id: Uuid) -> Result<(Self, String), sqlx::Error> {
        let plaintext = Self::generate();
        let token_hash = Self::hash_token(&plaintext);
        let token_prefix = Self::extract_prefix(&plaintext);

        let token = sqlx::query_as::<_, AuthToken>(
            r#"
            INSERT INTO auth_tokens (user_id, token_prefix, token_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
                SET token_prefix = EXCLUDED.token_prefix,
                    token_hash = EXCLUDED.token_hash,
                    created_at = NOW(),
                    last_used_at = NULL
            RETURNING id, user_id, token_prefix, token_hash, created_at, last_used_at
            "#,
        )
        .bind(user_id)
        .bind(token_prefix)
        .bind(token_hash)
        .fetch_one(pool)
        .await?;

        Ok((token, plaintext))
    }

    /// Validates a plaintext token.
    ///
    /// Returns the owning user's ID when the token exists and the user is
    /// active; bumps `last_used_at` as a side effect.
    pub async fn validate(pool: &PgPool, plaintext: &str) -> Result<Option<Uuid>, sqlx::Error> {
        let token_hash = Self::hash_token(plaintext);

        let user_id: Option<(Uuid,)> = sqlx::query_as(
            r#"
            UPDATE auth_tokens t
            SET last_used_at = NOW()
            FROM users u
            WHERE t.token_hash = $1
              AND u.id = t.user_id
              AND u.is_active = TRUE
            RETURNING t.user_id
            "#,
        )
        .bind(token_hash)
        .fetch_optional(pool)
        .await?;

        Ok(user_id.map(|(id,)| id))
    }
}
