//! User API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};

use super::dto::{RegisterRequest, TokenRequest, TokenResponse, UpdateProfileRequest, UserResponse};
use crate::application::UserService;
use crate::interfaces::http::common::{ApiError, FieldErrors, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Users state
#[derive(Clone)]
pub struct UsersState {
    pub users: Arc<UserService>,
}

#[utoipa::path(
    post,
    path = "/api/user/create/",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error", body = FieldErrors)
    )
)]
pub async fn create_user(
    State(state): State<UsersState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state.users.register(request.into()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

#[utoipa::path(
    post,
    path = "/api/user/token/",
    tag = "Users",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Auth token for the given credentials", body = TokenResponse),
        (status = 400, description = "Invalid credentials", body = FieldErrors)
    )
)]
pub async fn create_token(
    State(state): State<UsersState>,
    ValidatedJson(request): ValidatedJson<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state
        .users
        .obtain_token(&request.email, &request.password)
        .await?;
    Ok(Json(TokenResponse { token: token.key }))
}

#[utoipa::path(
    get,
    path = "/api/user/me/",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Authenticated user's profile", body = UserResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn retrieve_me(
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}

#[utoipa::path(
    patch,
    path = "/api/user/me/",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Validation error", body = FieldErrors),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn update_me(
    State(state): State<UsersState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let updated = state.users.update_profile(&user.id, request.into()).await?;
    Ok(Json(UserResponse::from(&updated)))
}
