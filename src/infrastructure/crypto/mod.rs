//! Cryptographic helpers: password hashing and token generation

pub mod password;
pub mod token;

pub use password::{PasswordHasher, MAX_BCRYPT_COST, MAX_PASSWORD_BYTES, MIN_BCRYPT_COST};
pub use token::generate_token_key;
