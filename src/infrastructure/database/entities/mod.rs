//! Database entities module

pub mod auth_token;
pub mod user;
