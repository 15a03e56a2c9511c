//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::UserService;
use crate::interfaces::http::common::FieldErrors;
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{health, users};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("Opaque token from POST /api/user/token/"))
                        .build(),
                ),
            );
            components.add_security_scheme(
                "token_auth",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("Authorization"))),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        users::create_user,
        users::create_token,
        users::retrieve_me,
        users::update_me,
    ),
    components(
        schemas(
            health::HealthResponse,
            health::ComponentHealth,
            users::RegisterRequest,
            users::UpdateProfileRequest,
            users::TokenRequest,
            users::TokenResponse,
            users::UserResponse,
            FieldErrors,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Registration, token authentication and own-profile management"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Build the HTTP router for the accounts API
pub fn create_api_router(users: Arc<UserService>, db: DatabaseConnection) -> Router {
    let auth_state = AuthState {
        users: users.clone(),
    };
    let users_state = users::UsersState { users };
    let health_state = health::HealthState {
        db,
        started_at: Arc::new(Instant::now()),
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Token auth wraps only the profile handlers, so unsupported methods
    // answer 405 before any credential check.
    let user_routes = Router::new()
        .route("/create/", post(users::create_user))
        .route("/token/", post(users::create_token))
        .route(
            "/me/",
            get(users::retrieve_me)
                .patch(users::update_me)
                .route_layer(middleware::from_fn_with_state(auth_state, auth_middleware)),
        )
        .with_state(users_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .nest("/api/user", user_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
