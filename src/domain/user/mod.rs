//! User aggregate
//!
//! Contains the User entity, DTOs, email normalization and repository interfaces.

pub mod email;
pub mod model;
pub mod repository;

mod dto_create;
mod dto_update;

pub use email::normalize_email;
pub use model::{AuthToken, User};

pub use dto_create::NewUser;
pub use dto_update::ProfileChanges;

pub use repository::{TokenRepositoryInterface, UserRepositoryInterface};
