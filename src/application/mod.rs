//! Application layer: identity use-cases orchestrated over domain repositories

pub mod identity;

pub use identity::{ProfileUpdate, Registration, UserFields, UserManager, UserService};
