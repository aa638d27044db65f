/*!
 * Caching for locale-listing pages.
 *
 * Listing responses for a locale are cached for a short TTL so repeated
 * reads skip the store. The cache is injected behind the [`ListingCache`]
 * trait; the query engine composes it with the repository and treats any
 * cache failure as a miss, so a broken cache degrades performance but
 * never blocks an operation.
 */

use std::fmt;
use std::time::Duration;

use crate::errors::CacheError;
use crate::query::pagination::Page;
use crate::store::TranslationRecord;

pub mod memory;

pub use memory::MemoryListingCache;

/// How long a cached listing page stays fresh unless invalidated first
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// A cached listing page
pub type CachedPage = Page<TranslationRecord>;

/// Cache key for a locale-listing page.
///
/// The page component is the raw requested page, not the effective one: a
/// request with no page parameter and a request for page 1 produce the same
/// listing but are cached under distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingKey {
    /// Locale being listed
    locale: String,

    /// Requested page, None when the request carried no page parameter
    page: Option<u32>,
}

impl ListingKey {
    /// Create a new listing key
    pub fn new(locale: &str, page: Option<u32>) -> Self {
        Self {
            locale: locale.to_string(),
            page,
        }
    }

    /// Locale component of the key
    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl fmt::Display for ListingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.page {
            Some(page) => write!(f, "translations_{}_page_{}", self.locale, page),
            None => write!(f, "translations_{}_page_", self.locale),
        }
    }
}

/// Storage interface for listing pages.
///
/// Implementations must be safe to share across tasks. All failures are
/// reported as [`CacheError`] and are advisory: callers fall back to the
/// store on a failed read and drop the page on a failed write.
pub trait ListingCache: Send + Sync {
    /// Look up a fresh page for the key. Expired entries count as misses.
    fn get(&self, key: &ListingKey) -> Result<Option<CachedPage>, CacheError>;

    /// Store a page under the key for the given TTL, replacing any
    /// previous entry.
    fn set(&self, key: ListingKey, page: CachedPage, ttl: Duration) -> Result<(), CacheError>;

    /// Drop every cached page for the locale, whatever page component it
    /// was stored under.
    fn invalidate_locale(&self, locale: &str) -> Result<(), CacheError>;
}
