//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories.

pub mod token_repository;
pub mod user_repository;

pub use token_repository::TokenRepository;
pub use user_repository::UserRepository;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

pub(crate) fn db_err(e: DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

/// Map write failures, turning unique-index violations into integrity errors.
pub(crate) fn write_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => DomainError::Integrity(detail),
        _ => db_err(e),
    }
}
