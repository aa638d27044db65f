/*!
 * Input validation for write requests.
 *
 * Validation runs after authentication and before any store work. A
 * rejected payload produces no partial write. All fields are checked in
 * one pass so the failure names every offending field, not just the first.
 */

use crate::errors::{FieldError, ValidationError};

use super::requests::{UpsertInput, UpsertRequest};

/// Validate an upsert payload.
///
/// Fields are trimmed before checking; a field that is absent or trims to
/// nothing is reported as required. On success the returned input carries
/// the trimmed values.
pub fn validate_upsert(request: &UpsertRequest) -> Result<UpsertInput, ValidationError> {
    let mut errors = Vec::new();

    let key = required_field("key", &request.key, &mut errors);
    let locale = required_field("locale", &request.locale, &mut errors);
    let value = required_field("value", &request.value, &mut errors);
    let context = required_field("context", &request.context, &mut errors);

    if !errors.is_empty() {
        return Err(ValidationError::new(errors));
    }

    Ok(UpsertInput {
        key,
        locale,
        value,
        context,
    })
}

/// Extract a required field, recording a field error when it is missing or
/// blank after trimming
fn required_field(
    name: &'static str,
    value: &Option<String>,
    errors: &mut Vec<FieldError>,
) -> String {
    match value.as_deref().map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => trimmed.to_string(),
        _ => {
            errors.push(FieldError::required(name));
            String::new()
        }
    }
}
