//! Domain layer
//!
//! Core identity types, errors and the repository interfaces that the
//! infrastructure layer implements.

pub mod error;
pub mod user;

pub use error::{DomainError, DomainResult};
pub use user::{
    normalize_email, AuthToken, NewUser, ProfileChanges, TokenRepositoryInterface, User,
    UserRepositoryInterface,
};
