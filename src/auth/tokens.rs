/*!
 * Token issuance and verification backed by the store.
 *
 * Plain tokens are 40-character alphanumeric strings shown exactly once at
 * issue time. The store keeps only the SHA-256 digest, so a leaked
 * database does not leak usable tokens.
 */

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use rand::distr::{Alphanumeric, SampleString};
use rusqlite::{params, OptionalExtension};
use sha2::{Digest, Sha256};

use crate::errors::{AuthError, CoreError, StoreError};
use crate::store::StoreConnection;

use super::{Authenticator, Principal};

/// Length of generated plain tokens
const TOKEN_LENGTH: usize = 40;

/// A freshly issued token. This is the only place the plain token exists.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Id of the stored token row
    pub id: i64,
    /// Label the token was issued under
    pub name: String,
    /// The plain bearer token to hand to the caller
    pub plain_token: String,
}

/// Authenticator backed by the api_tokens table
pub struct TokenAuthenticator {
    db: StoreConnection,
}

impl TokenAuthenticator {
    /// Create a new authenticator over the given store connection
    pub fn new(db: StoreConnection) -> Self {
        Self { db }
    }

    /// Issue a new token under the given label.
    ///
    /// The returned [`IssuedToken`] carries the plain token; it is not
    /// recoverable afterwards.
    pub async fn issue(&self, name: &str) -> Result<IssuedToken, StoreError> {
        let plain_token = Alphanumeric.sample_string(&mut rand::rng(), TOKEN_LENGTH);
        let token_hash = hash_token(&plain_token);
        let label = name.to_string();

        let id = self
            .db
            .execute_async(move |conn| {
                conn.execute(
                    "INSERT INTO api_tokens (name, token_hash, created_at) VALUES (?1, ?2, ?3)",
                    params![label, token_hash, Utc::now().to_rfc3339()],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(StoreError::from)?;

        info!("Issued API token '{}' (id {})", name, id);

        Ok(IssuedToken {
            id,
            name: name.to_string(),
            plain_token,
        })
    }

    /// Revoke a token by id. Returns false when no such token existed.
    pub async fn revoke(&self, token_id: i64) -> Result<bool, StoreError> {
        let removed = self
            .db
            .execute_async(move |conn| {
                let affected =
                    conn.execute("DELETE FROM api_tokens WHERE id = ?1", params![token_id])?;
                Ok(affected > 0)
            })
            .await
            .map_err(StoreError::from)?;

        if removed {
            info!("Revoked API token {}", token_id);
        }

        Ok(removed)
    }
}

#[async_trait]
impl Authenticator for TokenAuthenticator {
    async fn authenticate(&self, token: Option<&str>) -> Result<Principal, CoreError> {
        let token = match token {
            Some(token) if !token.is_empty() => token,
            _ => return Err(CoreError::from(AuthError::MissingToken)),
        };

        let token_hash = hash_token(token);

        let found: Option<(i64, String)> = self
            .db
            .execute_async(move |conn| {
                let row = conn
                    .query_row(
                        "SELECT id, name FROM api_tokens WHERE token_hash = ?1",
                        params![token_hash],
                        |row| Ok((row.get(0)?, row.get(1)?)),
                    )
                    .optional()?;

                if let Some((id, _)) = &row {
                    conn.execute(
                        "UPDATE api_tokens SET last_used_at = ?1 WHERE id = ?2",
                        params![Utc::now().to_rfc3339(), id],
                    )?;
                }

                Ok(row)
            })
            .await
            .map_err(StoreError::from)?;

        match found {
            Some((token_id, name)) => {
                debug!("Authenticated principal '{}' (token {})", name, token_id);
                Ok(Principal { token_id, name })
            }
            None => Err(CoreError::from(AuthError::InvalidToken)),
        }
    }
}

/// SHA-256 hex digest of a plain token
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
