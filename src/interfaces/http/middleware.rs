//! Token authentication middleware for Axum

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::application::UserService;
use crate::domain::{DomainError, User};
use crate::interfaces::http::common::ApiError;

/// Authorization header keywords accepted in front of the token key
const TOKEN_KEYWORDS: [&str; 2] = ["Bearer", "Token"];

/// Authentication state
#[derive(Clone)]
pub struct AuthState {
    pub users: Arc<UserService>,
}

/// The caller resolved from a valid token, stored in request extensions
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub User);

/// Authentication error types
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    MalformedHeader,
}

impl AuthError {
    fn message(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "Authentication credentials were not provided.",
            AuthError::MalformedHeader => {
                "Invalid token header. Expected `Bearer <token>` or `Token <token>`."
            }
        }
    }
}

/// Pull the token key out of an `Authorization` header value.
///
/// `Ok(None)` means the header uses some other scheme and is ignored.
fn extract_token(auth_header: &str) -> Result<Option<&str>, AuthError> {
    let mut parts = auth_header.split_whitespace();
    let Some(keyword) = parts.next() else {
        return Ok(None);
    };

    if !TOKEN_KEYWORDS
        .iter()
        .any(|k| k.eq_ignore_ascii_case(keyword))
    {
        return Ok(None);
    }

    match (parts.next(), parts.next()) {
        (Some(key), None) => Ok(Some(key)),
        _ => Err(AuthError::MalformedHeader),
    }
}

fn auth_error_response(error: AuthError) -> Response {
    ApiError::from(DomainError::Unauthorized(error.message().into())).into_response()
}

/// Require a valid token; the resolved user is inserted as `AuthenticatedUser`.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();

    let key = match extract_token(auth_header) {
        Ok(Some(key)) => key.to_string(),
        Ok(None) => return auth_error_response(AuthError::MissingToken),
        Err(e) => return auth_error_response(e),
    };

    match auth_state.users.resolve_token(&key).await {
        Ok(user) => {
            request.extensions_mut().insert(AuthenticatedUser(user));
            next.run(request).await
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_bearer_and_token_keywords() {
        assert_eq!(extract_token("Bearer abc123"), Ok(Some("abc123")));
        assert_eq!(extract_token("Token abc123"), Ok(Some("abc123")));
        assert_eq!(extract_token("token abc123"), Ok(Some("abc123")));
    }

    #[test]
    fn ignores_other_schemes() {
        assert_eq!(extract_token(""), Ok(None));
        assert_eq!(extract_token("Basic dXNlcjpwYXNz"), Ok(None));
    }

    #[test]
    fn rejects_malformed_headers() {
        assert_eq!(extract_token("Bearer"), Err(AuthError::MalformedHeader));
        assert_eq!(extract_token("Token a b"), Err(AuthError::MalformedHeader));
    }
}
