/*!
 * Query operations over the translation store.
 *
 * This module provides:
 * - Fixed-size pagination shared by listing, search and export
 * - The query engine composing the repository with the listing cache
 */

pub mod engine;
pub mod pagination;

// Re-export main types
pub use engine::{QueryEngine, SearchFilters};
pub use pagination::{Page, PaginationMeta};
