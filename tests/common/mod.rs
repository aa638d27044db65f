/*!
 * Common test utilities for the lexistore test suite
 */

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tempfile::TempDir;

use lexistore::api::Pipeline;
use lexistore::auth::TokenAuthenticator;
use lexistore::cache::ListingCache;
use lexistore::query::QueryEngine;
use lexistore::store::{StoreConnection, TranslationRepository};

// Re-export the mock caches module
pub mod mock_caches;

/// Creates a temporary directory for file-backed store tests
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a fresh in-memory store connection
pub fn memory_store() -> Result<StoreConnection> {
    StoreConnection::new_in_memory()
}

/// Creates a query engine over a fresh in-memory store with the default cache
pub fn memory_engine() -> Result<QueryEngine> {
    let db = memory_store()?;
    Ok(QueryEngine::with_default_cache(TranslationRepository::new(
        db,
    )))
}

/// Creates a query engine over a fresh in-memory store with the given cache
/// and TTL
pub fn memory_engine_with_cache(
    cache: Arc<dyn ListingCache>,
    ttl: Duration,
) -> Result<QueryEngine> {
    let db = memory_store()?;
    Ok(QueryEngine::new(
        TranslationRepository::new(db),
        cache,
        ttl,
    ))
}

/// Creates a pipeline over a fresh in-memory store with one issued bearer
/// token, returning the pipeline together with the plain token
pub async fn authenticated_pipeline() -> Result<(Pipeline<TokenAuthenticator>, String)> {
    let db = memory_store()?;

    let authenticator = TokenAuthenticator::new(db.clone());
    let issued = authenticator.issue("test-suite").await?;

    let engine = QueryEngine::with_default_cache(TranslationRepository::new(db));
    Ok((Pipeline::new(authenticator, engine), issued.plain_token))
}

/// Seeds the engine with sequentially-keyed records in the given locale
pub async fn seed_locale(engine: &QueryEngine, locale: &str, count: usize) -> Result<()> {
    for i in 0..count {
        engine
            .upsert(
                &format!("seed.key_{:03}", i),
                locale,
                &format!("Value {}", i),
                "web",
            )
            .await?;
    }
    Ok(())
}
