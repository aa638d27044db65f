/*!
 * Response envelopes for pipeline operations.
 *
 * Envelopes carry an HTTP-equivalent status code next to the JSON body so
 * HTTP front ends and the CLI surface the same outcomes. Bodies are plain
 * `serde_json::Value`s; object keys serialize in sorted order, so equal
 * data always produces identical bytes.
 */

use serde_json::{json, Map, Value};

use crate::errors::{CoreError, ValidationError};
use crate::export::ExportDocument;
use crate::query::Page;
use crate::store::RecordView;

/// A fully serialized operation outcome
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP-equivalent status code
    pub status: u16,
    /// JSON body
    pub body: Value,
}

impl ApiResponse {
    /// Whether the status signals success
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Envelope for a successful upsert
pub fn upsert_success(view: &RecordView) -> ApiResponse {
    ApiResponse {
        status: 200,
        body: json!({
            "message": "Success",
            "data": view,
        }),
    }
}

/// Envelope for a successful delete
pub fn delete_success() -> ApiResponse {
    ApiResponse {
        status: 200,
        body: json!({
            "message": "Deleted",
        }),
    }
}

/// Envelope for listing and search pages
pub fn page_success(page: &Page<RecordView>) -> ApiResponse {
    ApiResponse {
        status: 200,
        body: json!({
            "data": page.items,
            "pagination": page.meta(),
        }),
    }
}

/// Envelope for an export document
pub fn export_success(document: &ExportDocument) -> ApiResponse {
    ApiResponse {
        status: 200,
        body: json!({
            "data": document.data,
            "pagination": document.pagination,
        }),
    }
}

/// Envelope naming every offending field of a rejected payload
pub fn validation_failed(error: &ValidationError) -> ApiResponse {
    let mut errors = Map::new();
    for field in &error.fields {
        let entry = errors
            .entry(field.field)
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(messages) = entry {
            messages.push(Value::String(field.message.clone()));
        }
    }

    ApiResponse {
        status: 422,
        body: json!({
            "message": "Validation failed",
            "errors": errors,
        }),
    }
}

/// Map an operation error to its response envelope
pub fn from_error(error: &CoreError) -> ApiResponse {
    match error {
        CoreError::Validation(err) => validation_failed(err),
        CoreError::NotFound(err) => ApiResponse {
            status: 404,
            body: json!({
                "message": err.to_string(),
            }),
        },
        CoreError::Auth(_) => ApiResponse {
            status: 401,
            body: json!({
                "message": "Unauthenticated.",
            }),
        },
        CoreError::Store(_) => ApiResponse {
            status: 500,
            body: json!({
                "message": "Server Error",
            }),
        },
    }
}
