/*!
 * Request payloads accepted by the pipeline.
 */

use serde::{Deserialize, Serialize};

/// Raw upsert payload before validation.
///
/// Every field is optional at this stage so that validation can report all
/// missing fields in one pass instead of failing on the first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpsertRequest {
    /// Translation key
    pub key: Option<String>,
    /// Locale code
    pub locale: Option<String>,
    /// Translated text
    pub value: Option<String>,
    /// Usage context tag
    pub context: Option<String>,
}

impl UpsertRequest {
    /// Build a fully-populated payload
    pub fn new(key: &str, locale: &str, value: &str, context: &str) -> Self {
        Self {
            key: Some(key.to_string()),
            locale: Some(locale.to_string()),
            value: Some(value.to_string()),
            context: Some(context.to_string()),
        }
    }
}

/// A validated upsert payload. All fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertInput {
    pub key: String,
    pub locale: String,
    pub value: String,
    pub context: String,
}
