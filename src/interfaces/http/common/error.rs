//! Error responses
//!
//! Bodies follow three shapes:
//! - field errors: `{"email": ["Enter a valid email address."]}`
//! - errors not tied to a field: `{"non_field_errors": ["..."]}`
//! - everything else: `{"detail": "..."}`

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Key for errors that do not belong to a single input field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Validation messages keyed by field name
#[derive(Debug, Default, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = Self::default();
        for (field, errs) in errors.field_errors() {
            for e in errs.iter() {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({}).", e.code));
                out.add(field.to_string(), msg);
            }
        }
        if out.is_empty() {
            out.add(NON_FIELD_ERRORS, "Validation failed.");
        }
        out
    }
}

/// Everything a handler can fail with
#[derive(Debug)]
pub enum ApiError {
    /// Body is not valid JSON for the expected type.
    Json(JsonRejection),
    /// Body parsed but failed field validation.
    Validation(FieldErrors),
    Domain(DomainError),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

fn detail(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "detail": message.into() }))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Json(rejection) => detail(
                rejection.status(),
                format!("JSON parse error - {}", rejection.body_text()),
            ),
            Self::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            Self::Domain(err) => domain_error_response(err),
        }
    }
}

fn domain_error_response(err: DomainError) -> Response {
    match err {
        DomainError::InvalidInput(message) => (
            StatusCode::BAD_REQUEST,
            Json(FieldErrors::single(NON_FIELD_ERRORS, message)),
        )
            .into_response(),
        DomainError::Conflict { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(FieldErrors::single(field, message)),
        )
            .into_response(),
        DomainError::InvalidCredentials => (
            StatusCode::BAD_REQUEST,
            Json(FieldErrors::single(NON_FIELD_ERRORS, err.to_string())),
        )
            .into_response(),
        DomainError::Unauthorized(message) => {
            let mut response = detail(StatusCode::UNAUTHORIZED, message);
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, header::HeaderValue::from_static("Token"));
            response
        }
        DomainError::NotFound { .. } => detail(StatusCode::NOT_FOUND, "Not found."),
        DomainError::Integrity(_) | DomainError::Storage(_) | DomainError::Crypto(_) => {
            error!(error = %err, "Request failed with server error");
            detail(StatusCode::INTERNAL_SERVER_ERROR, "A server error occurred.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn conflict_is_field_error() {
        let response = ApiError::from(DomainError::Conflict {
            field: "email",
            message: "taken".into(),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"email": ["taken"]}));
    }

    #[tokio::test]
    async fn invalid_credentials_use_generic_message() {
        let response = ApiError::from(DomainError::InvalidCredentials).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"non_field_errors": ["Unable to authenticate with provided credentials."]})
        );
    }

    #[tokio::test]
    async fn unauthorized_sets_challenge_header() {
        let response =
            ApiError::from(DomainError::Unauthorized("Invalid token.".into())).into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Token");
    }

    #[tokio::test]
    async fn storage_errors_hide_details() {
        let response =
            ApiError::from(DomainError::Integrity("UNIQUE constraint failed".into())).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"detail": "A server error occurred."})
        );
    }
}
