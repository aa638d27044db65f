/*!
 * Repository layer for translation records.
 *
 * All reads exclude soft-deleted rows. The upsert identity is the
 * (key, locale) pair over live rows only: once a record is soft-deleted it
 * no longer participates in matching, so a later upsert of the same pair
 * creates a fresh row with a fresh id while the tombstone stays behind.
 */

use anyhow::Result;
use chrono::Utc;
use log::debug;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::errors::{CoreError, NotFoundError, StoreError};

use super::connection::StoreConnection;
use super::models::{TranslationRecord, UpsertOutcome};

/// Columns selected whenever a full record is hydrated
const RECORD_COLUMNS: &str = "id, key, locale, value, context, created_at, updated_at, deleted_at";

/// Filter applied to listing, search and count queries. All clauses are
/// combined with AND; an empty filter matches every live record.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    /// Exact locale match
    pub locale_eq: Option<String>,
    /// Substring match on key
    pub key_like: Option<String>,
    /// Substring match on locale
    pub locale_like: Option<String>,
    /// Exact context match
    pub context_eq: Option<String>,
}

/// Row ordering for listing queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOrder {
    /// Insertion order, oldest id first
    IdAsc,
    /// Most recently updated first, higher id breaking timestamp ties
    UpdatedAtDesc,
}

impl RecordOrder {
    fn sql(self) -> &'static str {
        match self {
            RecordOrder::IdAsc => "id ASC",
            RecordOrder::UpdatedAtDesc => "updated_at DESC, id DESC",
        }
    }
}

/// Repository for translation record operations
pub struct TranslationRepository {
    db: StoreConnection,
}

impl TranslationRepository {
    /// Create a new repository over the given store connection
    pub fn new(db: StoreConnection) -> Self {
        Self { db }
    }

    // ===== Write Operations =====

    /// Insert or refresh the record for a (key, locale) pair.
    ///
    /// When a live record matches, its value, context and updated_at are
    /// replaced in place and the id is preserved. Otherwise a new row is
    /// inserted. The match and the write happen in one transaction.
    pub async fn upsert(
        &self,
        key: &str,
        locale: &str,
        value: &str,
        context: &str,
    ) -> Result<(TranslationRecord, UpsertOutcome), StoreError> {
        let key = key.to_string();
        let locale = locale.to_string();
        let value = value.to_string();
        let context = context.to_string();

        self.db
            .transaction_async(move |tx| {
                let existing: Option<i64> = tx
                    .query_row(
                        "SELECT id FROM translations
                         WHERE key = ?1 AND locale = ?2 AND deleted_at IS NULL
                         ORDER BY id LIMIT 1",
                        params![key, locale],
                        |row| row.get(0),
                    )
                    .optional()?;

                let now = Utc::now().to_rfc3339();

                match existing {
                    Some(id) => {
                        tx.execute(
                            "UPDATE translations
                             SET value = ?1, context = ?2, updated_at = ?3
                             WHERE id = ?4",
                            params![value, context, now, id],
                        )?;
                        debug!("Updated translation record {} ({} / {})", id, key, locale);

                        let record = fetch_record(tx, id)?;
                        Ok((record, UpsertOutcome::Updated))
                    }
                    None => {
                        tx.execute(
                            "INSERT INTO translations (key, locale, value, context, created_at, updated_at)
                             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                            params![key, locale, value, context, now, now],
                        )?;
                        let id = tx.last_insert_rowid();
                        debug!("Created translation record {} ({} / {})", id, key, locale);

                        let record = fetch_record(tx, id)?;
                        Ok((record, UpsertOutcome::Created))
                    }
                }
            })
            .await
            .map_err(StoreError::from)
    }

    /// Soft-delete the live record with the given id.
    ///
    /// Sets the deletion timestamp and returns the tombstoned record so the
    /// caller still knows which locale was touched. Fails with
    /// [`NotFoundError`] when the id does not resolve to a live record.
    pub async fn soft_delete(&self, id: i64) -> Result<TranslationRecord, CoreError> {
        let deleted = self
            .db
            .transaction_async(move |tx| {
                let existing = find_live(tx, id)?;

                match existing {
                    Some(mut record) => {
                        let now = Utc::now().to_rfc3339();
                        tx.execute(
                            "UPDATE translations SET deleted_at = ?1, updated_at = ?1 WHERE id = ?2",
                            params![now, id],
                        )?;
                        record.deleted_at = Some(now.clone());
                        record.updated_at = now;

                        debug!("Soft-deleted translation record {}", id);
                        Ok(Some(record))
                    }
                    None => Ok(None),
                }
            })
            .await
            .map_err(StoreError::from)?;

        deleted.ok_or_else(|| CoreError::from(NotFoundError { id }))
    }

    // ===== Read Operations =====

    /// Fetch the live record with the given id, failing with
    /// [`NotFoundError`] when the id is unknown or tombstoned.
    pub async fn find_active_by_id(&self, id: i64) -> Result<TranslationRecord, CoreError> {
        let found = self
            .db
            .execute_async(move |conn| find_live(conn, id))
            .await
            .map_err(StoreError::from)?;

        found.ok_or_else(|| CoreError::from(NotFoundError { id }))
    }

    /// List live records matching the filter, one page at a time.
    ///
    /// Returns the requested page of records together with the total number
    /// of matching records. Pages are 1-based; a page beyond the data comes
    /// back empty while the total still reflects every match.
    pub async fn list_active(
        &self,
        filter: ListFilter,
        order: RecordOrder,
        page: u32,
        per_page: u32,
    ) -> Result<(Vec<TranslationRecord>, u64), StoreError> {
        let page = page.max(1);
        let offset = u64::from(page - 1) * u64::from(per_page);

        self.db
            .execute_async(move |conn| {
                let (where_clause, params) = build_where_clause(&filter);

                let total: i64 = conn.query_row(
                    &format!("SELECT COUNT(*) FROM translations WHERE {}", where_clause),
                    params_from_iter(params.iter()),
                    |row| row.get(0),
                )?;

                let sql = format!(
                    "SELECT {} FROM translations WHERE {} ORDER BY {} LIMIT {} OFFSET {}",
                    RECORD_COLUMNS,
                    where_clause,
                    order.sql(),
                    per_page,
                    offset
                );
                let mut stmt = conn.prepare(&sql)?;
                let records = stmt
                    .query_map(params_from_iter(params.iter()), record_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;

                Ok((records, total as u64))
            })
            .await
            .map_err(StoreError::from)
    }

    /// Count live records matching the filter
    pub async fn count_active(&self, filter: ListFilter) -> Result<u64, StoreError> {
        self.db
            .execute_async(move |conn| {
                let (where_clause, params) = build_where_clause(&filter);

                let total: i64 = conn.query_row(
                    &format!("SELECT COUNT(*) FROM translations WHERE {}", where_clause),
                    params_from_iter(params.iter()),
                    |row| row.get(0),
                )?;

                Ok(total as u64)
            })
            .await
            .map_err(StoreError::from)
    }
}

// ===== Query Building =====

/// Build the WHERE clause and its positional parameters for a filter.
/// Live-record exclusion is always the first clause.
fn build_where_clause(filter: &ListFilter) -> (String, Vec<String>) {
    let mut clauses = vec!["deleted_at IS NULL".to_string()];
    let mut params: Vec<String> = Vec::new();

    if let Some(locale) = &filter.locale_eq {
        params.push(locale.clone());
        clauses.push(format!("locale = ?{}", params.len()));
    }
    if let Some(key) = &filter.key_like {
        params.push(format!("%{}%", escape_like(key)));
        clauses.push(format!("key LIKE ?{} ESCAPE '\\'", params.len()));
    }
    if let Some(locale) = &filter.locale_like {
        params.push(format!("%{}%", escape_like(locale)));
        clauses.push(format!("locale LIKE ?{} ESCAPE '\\'", params.len()));
    }
    if let Some(context) = &filter.context_eq {
        params.push(context.clone());
        clauses.push(format!("context = ?{}", params.len()));
    }

    (clauses.join(" AND "), params)
}

/// Escape LIKE wildcards in user-supplied substrings so they match
/// literally. The queries declare `ESCAPE '\'`.
fn escape_like(pattern: &str) -> String {
    pattern
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Map a full-column row to a record
fn record_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TranslationRecord> {
    Ok(TranslationRecord {
        id: row.get(0)?,
        key: row.get(1)?,
        locale: row.get(2)?,
        value: row.get(3)?,
        context: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
        deleted_at: row.get(7)?,
    })
}

/// Fetch a record by id regardless of tombstone state
fn fetch_record(conn: &Connection, id: i64) -> Result<TranslationRecord> {
    let record = conn.query_row(
        &format!("SELECT {} FROM translations WHERE id = ?1", RECORD_COLUMNS),
        params![id],
        record_from_row,
    )?;

    Ok(record)
}

/// Fetch the live record with the given id, if any
fn find_live(conn: &Connection, id: i64) -> Result<Option<TranslationRecord>> {
    let record = conn
        .query_row(
            &format!(
                "SELECT {} FROM translations WHERE id = ?1 AND deleted_at IS NULL",
                RECORD_COLUMNS
            ),
            params![id],
            record_from_row,
        )
        .optional()?;

    Ok(record)
}
