/*!
 * Durable storage for translation records.
 *
 * This module provides SQLite-based persistence for:
 * - Translation records keyed by (key, locale) with soft-delete tombstones
 * - API tokens for the request pipeline
 * - Seed-data generation for development databases
 */

pub mod connection;
pub mod factory;
pub mod models;
pub mod repository;
pub mod schema;

// Re-export main types
pub use connection::StoreConnection;
pub use models::{RecordView, TranslationRecord, UpsertOutcome};
pub use repository::{ListFilter, RecordOrder, TranslationRepository};
