//! Shared HTTP plumbing

pub mod error;
pub mod validated_json;

pub use error::{ApiError, FieldErrors, NON_FIELD_ERRORS};
pub use validated_json::ValidatedJson;
