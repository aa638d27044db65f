/*!
 * # Lexistore - Localization String Store
 *
 * A Rust library and CLI for managing localized UI strings.
 *
 * ## Features
 *
 * - Upsert translation records keyed by (key, locale) with per-record context tags
 * - Soft deletion: deleted records leave tombstones and stop appearing in reads
 * - Paginated per-locale listings with read-through TTL caching
 * - Cross-field search over keys, locales and contexts
 * - Bulk export as nested locale -> key -> value documents
 * - Token-authenticated operation pipeline with uniform response envelopes
 * - Seed-data generation for development databases
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `store`: SQLite persistence:
 *   - `store::repository`: Record operations over the connection
 *   - `store::schema`: Tables, indexes and migrations
 *   - `store::factory`: Seed-data generation
 * - `cache`: TTL caching of locale-listing pages
 * - `query`: Pagination and the engine composing repository and cache
 * - `export`: Locale-grouped bulk export documents
 * - `auth`: Bearer-token issuance and verification
 * - `api`: Request validation, response envelopes and the operation pipeline
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod api;
pub mod app_config;
pub mod auth;
pub mod cache;
pub mod errors;
pub mod export;
pub mod query;
pub mod store;

// Re-export main types for easier usage
pub use api::{ApiResponse, Pipeline, UpsertRequest};
pub use app_config::Config;
pub use auth::{Authenticator, Principal, TokenAuthenticator};
pub use cache::{ListingCache, MemoryListingCache};
pub use errors::{AuthError, CacheError, CoreError, NotFoundError, StoreError, ValidationError};
pub use query::{Page, QueryEngine, SearchFilters};
pub use store::{StoreConnection, TranslationRecord, TranslationRepository};
