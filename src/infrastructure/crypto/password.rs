//! Password hashing utilities
//!
//! bcrypt runs on the blocking pool so a login does not stall a runtime
//! worker for the duration of the hash.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::domain::DomainError;

/// Lowest work factor bcrypt accepts
pub const MIN_BCRYPT_COST: u32 = 4;
/// Highest work factor bcrypt accepts
pub const MAX_BCRYPT_COST: u32 = 31;

/// bcrypt only reads the first 72 bytes of its input. Longer passwords are
/// rejected instead of being silently truncated.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// bcrypt hasher with a configurable work factor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher {
    /// `cost` is clamped to the range bcrypt accepts (4..=31).
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_BCRYPT_COST, MAX_BCRYPT_COST),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password using bcrypt
    pub async fn hash(&self, password: &str) -> Result<String, DomainError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(DomainError::InvalidInput(format!(
                "Password must be at most {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }

        let cost = self.cost;
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| DomainError::Crypto(format!("Hashing task failed: {}", e)))?
            .map_err(|e| DomainError::Crypto(format!("Failed to hash password: {}", e)))
    }

    /// Verify a password against a hash. A malformed hash never verifies,
    /// nor does a password bcrypt would have to truncate.
    pub async fn verify(&self, password: &str, password_hash: &str) -> bool {
        if password.len() > MAX_PASSWORD_BYTES {
            return false;
        }

        let password = password.to_owned();
        let password_hash = password_hash.to_owned();
        tokio::task::spawn_blocking(move || verify(password, &password_hash).unwrap_or(false))
            .await
            .unwrap_or(false)
    }
}
