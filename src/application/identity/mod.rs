//! Identity module: user management & authentication
//!
//! `UserManager` owns user creation (email normalization, hashing, insert).
//! `UserService` validates registrations, profile updates and credentials
//! on top of it and issues auth tokens.

pub mod manager;
pub mod service;

pub use manager::{UserFields, UserManager};
pub use service::{ProfileUpdate, Registration, UserService};
