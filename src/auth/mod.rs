/*!
 * Authentication for the request pipeline.
 *
 * Every pipeline operation runs behind an [`Authenticator`]: a presented
 * bearer token is resolved to a [`Principal`] before any validation or
 * store work happens. The default implementation checks tokens against
 * the store's api_tokens table.
 */

use async_trait::async_trait;

use crate::errors::CoreError;

pub mod tokens;

pub use tokens::{IssuedToken, TokenAuthenticator};

/// The identity behind an authenticated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Id of the token that authenticated the request
    pub token_id: i64,

    /// Label the token was issued under
    pub name: String,
}

/// Common trait for authentication backends.
///
/// A missing token must fail without touching storage; an unknown token
/// fails after lookup. Both surface as auth errors, never as panics.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Resolve the presented token, if any, to a principal
    async fn authenticate(&self, token: Option<&str>) -> Result<Principal, CoreError>;
}
