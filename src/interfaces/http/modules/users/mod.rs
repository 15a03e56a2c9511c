//! Users module: registration, token issuance and own-profile management

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
