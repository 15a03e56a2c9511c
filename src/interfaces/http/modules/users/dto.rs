//! User DTOs

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::application::{ProfileUpdate, Registration};
use crate::domain::User;
use crate::infrastructure::crypto::MAX_PASSWORD_BYTES;

/// Reject passwords the hasher would have to truncate. Counted in bytes.
fn validate_password_bytes(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        let mut err = ValidationError::new("max_length");
        err.message = Some(Cow::Owned(format!(
            "Ensure this field has no more than {} bytes.",
            MAX_PASSWORD_BYTES
        )));
        return Err(err);
    }
    Ok(())
}

/// Public representation of a user; the password is never included
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub email: String,
    pub name: String,
}

impl From<&User> for UserResponse {
    fn from(u: &User) -> Self {
        Self {
            email: u.email.clone(),
            name: u.name.clone(),
        }
    }
}

/// Registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 255, message = "Ensure this field has no more than 255 characters.")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(
        length(min = 5, message = "Ensure this field has at least 5 characters."),
        custom(function = "validate_password_bytes")
    )]
    #[schema(write_only, min_length = 5)]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub name: Option<String>,
}

impl From<RegisterRequest> for Registration {
    fn from(r: RegisterRequest) -> Self {
        Self {
            email: r.email,
            password: r.password,
            name: r.name,
        }
    }
}

/// Partial profile update; absent fields stay unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub name: Option<String>,
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 255, message = "Ensure this field has no more than 255 characters.")
    )]
    pub email: Option<String>,
    #[validate(
        length(min = 5, message = "Ensure this field has at least 5 characters."),
        custom(function = "validate_password_bytes")
    )]
    #[schema(write_only, min_length = 5)]
    pub password: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(r: UpdateProfileRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            password: r.password,
        }
    }
}

/// Credentials exchanged for an auth token. The password is not trimmed.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TokenRequest {
    #[serde(default)]
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "This field may not be blank."),
        custom(function = "validate_password_bytes")
    )]
    #[schema(write_only, format = Password)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}
