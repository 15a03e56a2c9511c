//! Health module

pub mod handlers;

pub use handlers::*;
