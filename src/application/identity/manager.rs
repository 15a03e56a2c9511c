//! User factory: the only path that creates user rows

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    normalize_email, DomainError, DomainResult, NewUser, User, UserRepositoryInterface,
};
use crate::infrastructure::crypto::PasswordHasher;

/// Fields stored verbatim alongside email and password
#[derive(Debug, Clone)]
pub struct UserFields {
    pub name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl Default for UserFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
        }
    }
}

impl UserFields {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

pub struct UserManager {
    users: Arc<dyn UserRepositoryInterface>,
    hasher: PasswordHasher,
}

impl UserManager {
    pub fn new(users: Arc<dyn UserRepositoryInterface>, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }

    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    /// Create, save and return a new user.
    ///
    /// Rejects an empty email before touching the store. The email's domain
    /// is lower-cased and the password hashed before the single insert.
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        fields: UserFields,
    ) -> DomainResult<User> {
        if email.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "Users must have an email address".into(),
            ));
        }

        let password_hash = self.hasher.hash(password).await?;

        let user = self
            .users
            .create_user(NewUser {
                email: normalize_email(email),
                name: fields.name,
                password_hash,
                is_active: fields.is_active,
                is_staff: fields.is_staff,
                is_superuser: fields.is_superuser,
            })
            .await?;

        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Create a user with staff and superuser rights, whatever `fields` says.
    pub async fn create_superuser(
        &self,
        email: &str,
        password: &str,
        fields: UserFields,
    ) -> DomainResult<User> {
        let fields = UserFields {
            is_staff: true,
            is_superuser: true,
            ..fields
        };
        self.create_user(email, password, fields).await
    }
}
