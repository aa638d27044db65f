/*!
 * Page assembly for listing, search and export queries.
 *
 * Pages are 1-based and fixed-size per operation. The derived facts
 * (last_page, next_page, prev_page) are computed once when the page is
 * built so every surface reports the same numbers.
 */

use serde::{Deserialize, Serialize};

/// Records per page for locale listings
pub const LIST_PER_PAGE: u32 = 50;

/// Records per page for search results
pub const SEARCH_PER_PAGE: u32 = 20;

/// Records per page for bulk export
pub const EXPORT_PER_PAGE: u32 = 50;

/// Resolve a requested page to the 1-based page queries run against.
/// An absent page and page zero both resolve to the first page.
pub fn effective_page(page: Option<u32>) -> u32 {
    page.unwrap_or(1).max(1)
}

/// One page of query results plus the derived pagination facts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Records on this page
    pub items: Vec<T>,
    /// Total matching records across all pages
    pub total: u64,
    /// Fixed page size for the operation
    pub per_page: u32,
    /// The page these items belong to (1-based)
    pub current_page: u32,
    /// Number of the final page, at least 1 even with no matches
    pub last_page: u32,
    /// Next page number, None on the last page
    pub next_page: Option<u32>,
    /// Previous page number, None on the first page
    pub prev_page: Option<u32>,
}

impl<T> Page<T> {
    /// Assemble a page from query results.
    pub fn new(items: Vec<T>, total: u64, per_page: u32, current_page: u32) -> Self {
        let per_page = per_page.max(1);
        let current_page = current_page.max(1);
        let last_page = total.div_ceil(u64::from(per_page)).max(1) as u32;

        let next_page = if current_page < last_page {
            Some(current_page + 1)
        } else {
            None
        };
        let prev_page = if current_page > 1 {
            Some(current_page - 1)
        } else {
            None
        };

        Self {
            items,
            total,
            per_page,
            current_page,
            last_page,
            next_page,
            prev_page,
        }
    }

    /// Transform the items while keeping every pagination fact intact
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            per_page: self.per_page,
            current_page: self.current_page,
            last_page: self.last_page,
            next_page: self.next_page,
            prev_page: self.prev_page,
        }
    }

    /// The pagination facts without the items
    pub fn meta(&self) -> PaginationMeta {
        PaginationMeta {
            total: self.total,
            per_page: self.per_page,
            current_page: self.current_page,
            last_page: self.last_page,
            next_page: self.next_page,
            prev_page: self.prev_page,
        }
    }
}

/// The pagination object attached to listing, search and export responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub total: u64,
    pub per_page: u32,
    pub current_page: u32,
    pub last_page: u32,
    pub next_page: Option<u32>,
    pub prev_page: Option<u32>,
}
