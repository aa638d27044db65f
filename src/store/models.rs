/*!
 * Data models for the translation store.
 *
 * These structs map directly to the store tables. Timestamps are kept as
 * RFC3339 strings so that lexicographic comparison matches chronological
 * order in SQL.
 */

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single translation record as persisted in the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslationRecord {
    /// Auto-incrementing record identifier
    pub id: i64,
    /// Translation key, e.g. "welcome.title"
    pub key: String,
    /// Locale code, e.g. "en" or "fr"
    pub locale: String,
    /// Translated text
    pub value: String,
    /// Usage context tag, e.g. "web" or "mobile"
    pub context: String,
    /// Creation timestamp (RFC3339)
    pub created_at: String,
    /// Last update timestamp (RFC3339)
    pub updated_at: String,
    /// Soft-delete timestamp (RFC3339), None for live records
    pub deleted_at: Option<String>,
}

impl TranslationRecord {
    /// Create a new record ready for insertion. The id is assigned by the
    /// database on insert.
    pub fn new(key: &str, locale: &str, value: &str, context: &str) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id: 0,
            key: key.to_string(),
            locale: locale.to_string(),
            value: value.to_string(),
            context: context.to_string(),
            created_at: now.clone(),
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Whether this record carries a soft-delete tombstone.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Project this record to its listing view.
    pub fn view(&self) -> RecordView {
        RecordView {
            id: self.id,
            locale: self.locale.clone(),
            key: self.key.clone(),
            context: self.context.clone(),
            value: self.value.clone(),
        }
    }
}

/// The trimmed projection of a record exposed by listing and search
/// responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordView {
    pub id: i64,
    pub locale: String,
    pub key: String,
    pub context: String,
    pub value: String,
}

impl From<TranslationRecord> for RecordView {
    fn from(record: TranslationRecord) -> Self {
        RecordView {
            id: record.id,
            locale: record.locale,
            key: record.key,
            context: record.context,
            value: record.value,
        }
    }
}

/// Outcome of an upsert: whether the write created a fresh record or
/// refreshed a live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpsertOutcome {
    /// No live record matched the (key, locale) pair; a new row was inserted
    Created,
    /// A live record matched and its value, context and updated_at were refreshed
    Updated,
}

impl fmt::Display for UpsertOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpsertOutcome::Created => write!(f, "created"),
            UpsertOutcome::Updated => write!(f, "updated"),
        }
    }
}
