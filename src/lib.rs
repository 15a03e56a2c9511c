//! # Accounts Service
//!
//! User account backend: registration of email-identified users, exchange
//! of credentials for an opaque bearer token, and retrieval/partial update
//! of the caller's own profile over HTTP/JSON.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: User entity, email normalization, errors and repository traits
//! - **application**: Identity use cases (user factory, registration,
//!   authentication, token issuance, profile update)
//! - **infrastructure**: SeaORM database, migrations, password hashing and
//!   token generation
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Retry and shutdown helpers

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
