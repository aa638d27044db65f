/*!
 * Authenticated API surface over the translation store.
 *
 * This module provides:
 * - Request payloads and their validation
 * - Response envelopes shared by every invocation surface
 * - The pipeline running authenticate, validate, invoke and serialize in
 *   order for each operation
 */

pub mod pipeline;
pub mod requests;
pub mod responses;
pub mod validation;

// Re-export main types
pub use pipeline::Pipeline;
pub use requests::{UpsertInput, UpsertRequest};
pub use responses::ApiResponse;
