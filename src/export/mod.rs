/*!
 * Bulk export of translations as locale-grouped documents.
 *
 * An export page is reshaped from a flat record listing into nested
 * `locale -> key -> value` maps, ready for consumption by frontend i18n
 * frameworks. Map keys are sorted, so the same data always serializes to
 * the same bytes.
 */

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::query::pagination::{Page, PaginationMeta};
use crate::store::TranslationRecord;

/// One page of exported translations grouped by locale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Nested locale -> key -> value map
    pub data: BTreeMap<String, BTreeMap<String, String>>,
    /// Pagination facts for the flat record page this was built from
    pub pagination: PaginationMeta,
}

/// Reshape a page of records into a locale-grouped export document.
///
/// When the page holds several records for the same (locale, key) pair,
/// the later record wins. Tombstoned records never appear in the output.
pub fn transform(page: Page<TranslationRecord>) -> ExportDocument {
    let pagination = page.meta();

    let mut data: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    for record in page.items {
        if record.is_deleted() {
            continue;
        }

        data.entry(record.locale)
            .or_default()
            .insert(record.key, record.value);
    }

    ExportDocument { data, pagination }
}
