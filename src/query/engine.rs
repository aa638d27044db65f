/*!
 * Query engine composing the repository with the listing cache.
 *
 * All read and write operations flow through here. Locale listings are
 * served read-through from the injected cache; writes invalidate every
 * cached page for the touched locale before returning. Cache failures are
 * logged and treated as misses so a broken cache never blocks an
 * operation.
 */

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};

use crate::cache::{self, ListingCache, ListingKey, MemoryListingCache};
use crate::errors::CoreError;
use crate::export::{self, ExportDocument};
use crate::store::{
    ListFilter, RecordOrder, TranslationRecord, TranslationRepository, UpsertOutcome,
};

use super::pagination::{
    effective_page, Page, EXPORT_PER_PAGE, LIST_PER_PAGE, SEARCH_PER_PAGE,
};

/// Cross-field search criteria. Empty fields do not constrain the result,
/// so an all-empty search matches every live record.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SearchFilters {
    /// Substring match against record keys
    pub key: Option<String>,
    /// Substring match against locale codes
    pub locale: Option<String>,
    /// Exact match against the context tag
    pub context: Option<String>,
}

impl SearchFilters {
    /// Lower the search criteria onto a repository filter. Empty strings
    /// count as absent, same as a missing parameter.
    pub(crate) fn to_list_filter(&self) -> ListFilter {
        ListFilter {
            locale_eq: None,
            key_like: present(&self.key),
            locale_like: present(&self.locale),
            context_eq: present(&self.context),
        }
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Query engine over the translation store
pub struct QueryEngine {
    repository: TranslationRepository,
    cache: Arc<dyn ListingCache>,
    cache_ttl: Duration,
}

impl QueryEngine {
    /// Create an engine with an injected cache implementation
    pub fn new(
        repository: TranslationRepository,
        cache: Arc<dyn ListingCache>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            cache,
            cache_ttl,
        }
    }

    /// Create an engine backed by the in-memory cache with the default TTL
    pub fn with_default_cache(repository: TranslationRepository) -> Self {
        Self::new(
            repository,
            Arc::new(MemoryListingCache::new()),
            cache::DEFAULT_TTL,
        )
    }

    // ===== Reads =====

    /// List the live records for a locale, oldest first, one fixed-size
    /// page at a time.
    ///
    /// Results are cached per (locale, raw page) for the configured TTL, so
    /// within that window repeated calls return the identical page without
    /// touching the store.
    pub async fn list_locale(
        &self,
        locale: &str,
        page: Option<u32>,
    ) -> Result<Page<TranslationRecord>, CoreError> {
        let key = ListingKey::new(locale, page);

        match self.cache.get(&key) {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(err) => warn!("Listing cache read failed, falling back to store: {}", err),
        }

        let filter = ListFilter {
            locale_eq: Some(locale.to_string()),
            ..ListFilter::default()
        };
        let current_page = effective_page(page);
        let (records, total) = self
            .repository
            .list_active(filter, RecordOrder::IdAsc, current_page, LIST_PER_PAGE)
            .await?;
        let result = Page::new(records, total, LIST_PER_PAGE, current_page);

        if let Err(err) = self.cache.set(key, result.clone(), self.cache_ttl) {
            warn!("Listing cache write failed, serving uncached: {}", err);
        }

        Ok(result)
    }

    /// Search live records across locales, most recently updated first.
    /// Search results are never cached.
    pub async fn search(
        &self,
        filters: SearchFilters,
        page: Option<u32>,
    ) -> Result<Page<TranslationRecord>, CoreError> {
        let current_page = effective_page(page);
        let (records, total) = self
            .repository
            .list_active(
                filters.to_list_filter(),
                RecordOrder::UpdatedAtDesc,
                current_page,
                SEARCH_PER_PAGE,
            )
            .await?;

        Ok(Page::new(records, total, SEARCH_PER_PAGE, current_page))
    }

    /// Export one page of live records as a locale-grouped document,
    /// optionally restricted to a single locale.
    pub async fn export(
        &self,
        locale: Option<&str>,
        page: Option<u32>,
    ) -> Result<ExportDocument, CoreError> {
        let filter = ListFilter {
            locale_eq: locale.map(str::to_string),
            ..ListFilter::default()
        };
        let current_page = effective_page(page);
        let (records, total) = self
            .repository
            .list_active(filter, RecordOrder::IdAsc, current_page, EXPORT_PER_PAGE)
            .await?;

        Ok(export::transform(Page::new(
            records,
            total,
            EXPORT_PER_PAGE,
            current_page,
        )))
    }

    // ===== Writes =====

    /// Insert or refresh a record and drop every cached listing page for
    /// its locale.
    pub async fn upsert(
        &self,
        key: &str,
        locale: &str,
        value: &str,
        context: &str,
    ) -> Result<(TranslationRecord, UpsertOutcome), CoreError> {
        let (record, outcome) = self.repository.upsert(key, locale, value, context).await?;

        info!(
            "Translation '{}' {} for locale '{}' (record {})",
            record.key, outcome, record.locale, record.id
        );
        self.invalidate_locale(&record.locale);

        Ok((record, outcome))
    }

    /// Soft-delete a record and drop every cached listing page for its
    /// locale.
    pub async fn delete(&self, id: i64) -> Result<TranslationRecord, CoreError> {
        let record = self.repository.soft_delete(id).await?;

        info!(
            "Translation '{}' soft-deleted from locale '{}' (record {})",
            record.key, record.locale, record.id
        );
        self.invalidate_locale(&record.locale);

        Ok(record)
    }

    fn invalidate_locale(&self, locale: &str) {
        if let Err(err) = self.cache.invalidate_locale(locale) {
            warn!("Cache invalidation failed for locale '{}': {}", locale, err);
        }
    }
}
