//! User management service: application-layer orchestration
//!
//! All user-related business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::manager::{UserFields, UserManager};
use crate::domain::{
    normalize_email, AuthToken, DomainError, DomainResult, ProfileChanges, TokenRepositoryInterface,
    User, UserRepositoryInterface,
};
use crate::infrastructure::crypto::{generate_token_key, PasswordHasher};

const EMAIL_TAKEN: &str = "user with this email already exists.";

/// Validated registration payload
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

/// Validated partial profile update
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// User service: orchestrates all identity use-cases.
pub struct UserService {
    manager: UserManager,
    users: Arc<dyn UserRepositoryInterface>,
    tokens: Arc<dyn TokenRepositoryInterface>,
    hasher: PasswordHasher,
    /// Hash checked against when the email is unknown, so that lookups
    /// cost the same whether or not the account exists.
    dummy_hash: OnceCell<String>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepositoryInterface>,
        tokens: Arc<dyn TokenRepositoryInterface>,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            manager: UserManager::new(users.clone(), hasher),
            users,
            tokens,
            hasher,
            dummy_hash: OnceCell::new(),
        }
    }

    pub fn manager(&self) -> &UserManager {
        &self.manager
    }

    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new user. The email must not already be in use.
    pub async fn register(&self, registration: Registration) -> DomainResult<User> {
        let email = normalize_email(&registration.email);
        if self.users.get_user_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict {
                field: "email",
                message: EMAIL_TAKEN.into(),
            });
        }

        let fields = UserFields::named(registration.name.unwrap_or_default());
        let user = self
            .manager
            .create_user(&email, &registration.password, fields)
            .await?;

        info!(user_id = %user.id, "New user registered");
        Ok(user)
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check credentials and return the matching active user.
    ///
    /// Every failure is reported as `DomainError::InvalidCredentials`.
    pub async fn authenticate(&self, email: &str, password: &str) -> DomainResult<User> {
        let email = normalize_email(email);

        let Some(user) = self.users.get_user_by_email(&email).await? else {
            self.burn_password_check(password).await;
            debug!("Authentication failed: unknown email");
            return Err(DomainError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_hash).await {
            debug!(user_id = %user.id, "Authentication failed: wrong password");
            return Err(DomainError::InvalidCredentials);
        }

        if !user.is_active {
            debug!(user_id = %user.id, "Authentication failed: inactive account");
            return Err(DomainError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Authenticate and return the user's token, creating it on first use.
    pub async fn obtain_token(&self, email: &str, password: &str) -> DomainResult<AuthToken> {
        let user = self.authenticate(email, password).await?;
        let token = self
            .tokens
            .get_or_create(&user.id, &generate_token_key())
            .await?;

        info!(user_id = %user.id, "Auth token issued");
        Ok(token)
    }

    /// Resolve a presented token key to an active user.
    pub async fn resolve_token(&self, key: &str) -> DomainResult<User> {
        let Some(user) = self.tokens.find_user_by_key(key).await? else {
            return Err(DomainError::Unauthorized("Invalid token.".into()));
        };

        if !user.is_active {
            return Err(DomainError::Unauthorized("User inactive or deleted.".into()));
        }

        Ok(user)
    }

    // ── Profile ─────────────────────────────────────────────────

    pub async fn profile(&self, user_id: &str) -> DomainResult<User> {
        self.users
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| user_not_found(user_id))
    }

    pub async fn count_users(&self) -> DomainResult<u64> {
        self.users.count_users().await
    }

    /// Apply a partial update to the user's own profile.
    ///
    /// A new password is hashed here and handed to the repository separately
    /// from the generic fields; it is never stored as given.
    pub async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> DomainResult<User> {
        let email = match update.email {
            Some(email) => {
                let email = normalize_email(&email);
                if let Some(owner) = self.users.get_user_by_email(&email).await? {
                    if owner.id != user_id {
                        return Err(DomainError::Conflict {
                            field: "email",
                            message: EMAIL_TAKEN.into(),
                        });
                    }
                }
                Some(email)
            }
            None => None,
        };

        let password_hash = match update.password.as_deref() {
            Some(password) if !password.is_empty() => Some(self.hasher.hash(password).await?),
            _ => None,
        };

        let changes = ProfileChanges {
            name: update.name,
            email,
            password_hash,
        };
        let password_changed = changes.password_hash.is_some();

        let user = self
            .users
            .update_user(user_id, changes)
            .await?
            .ok_or_else(|| user_not_found(user_id))?;

        info!(user_id = %user.id, password_changed, "Profile updated");
        Ok(user)
    }

    // ── Helpers ─────────────────────────────────────────────────

    async fn burn_password_check(&self, password: &str) {
        let dummy = self
            .dummy_hash
            .get_or_init(|| async {
                self.hasher
                    .hash("timing-equalizer")
                    .await
                    .unwrap_or_default()
            })
            .await;
        let _ = self.hasher.verify(password, dummy).await;
    }
}

fn user_not_found(user_id: &str) -> DomainError {
    DomainError::NotFound {
        entity: "User",
        field: "id",
        value: user_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::crypto::{MAX_PASSWORD_BYTES, MIN_BCRYPT_COST};
    use crate::infrastructure::database::repositories::{TokenRepository, UserRepository};
    use crate::infrastructure::database::testing::memory_db;

    async fn service() -> UserService {
        let db = memory_db().await;
        UserService::new(
            Arc::new(UserRepository::new(db.clone())),
            Arc::new(TokenRepository::new(db)),
            PasswordHasher::new(MIN_BCRYPT_COST),
        )
    }

    fn registration(email: &str) -> Registration {
        Registration {
            email: email.to_string(),
            password: "testpass123".to_string(),
            name: Some("Test Name".to_string()),
        }
    }

    #[tokio::test]
    async fn register_creates_user() {
        let svc = service().await;
        let user = svc.register(registration("test@example.com")).await.unwrap();

        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.name, "Test Name");
        assert!(svc.hasher().verify("testpass123", &user.password_hash).await);
    }

    #[tokio::test]
    async fn register_rejects_taken_email_in_any_domain_case() {
        let svc = service().await;
        svc.register(registration("test@example.com")).await.unwrap();

        let err = svc
            .register(registration("test@EXAMPLE.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Conflict { field: "email", .. }));
    }

    #[tokio::test]
    async fn authenticate_collapses_failures() {
        let svc = service().await;
        svc.register(registration("auth@example.com")).await.unwrap();

        assert!(svc.authenticate("auth@example.com", "testpass123").await.is_ok());
        assert!(svc.authenticate("auth@Example.COM", "testpass123").await.is_ok());

        let wrong_password = svc.authenticate("auth@example.com", "bad").await.unwrap_err();
        let unknown = svc.authenticate("nobody@example.com", "testpass123").await.unwrap_err();
        assert!(matches!(wrong_password, DomainError::InvalidCredentials));
        assert!(matches!(unknown, DomainError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn inactive_user_cannot_authenticate() {
        let svc = service().await;
        let fields = UserFields {
            is_active: false,
            ..UserFields::default()
        };
        svc.manager()
            .create_user("inactive@example.com", "testpass123", fields)
            .await
            .unwrap();

        let err = svc
            .authenticate("inactive@example.com", "testpass123")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn obtain_token_reuses_key() {
        let svc = service().await;
        let user = svc.register(registration("tok@example.com")).await.unwrap();

        let first = svc.obtain_token("tok@example.com", "testpass123").await.unwrap();
        let second = svc.obtain_token("tok@example.com", "testpass123").await.unwrap();

        assert_eq!(first.key, second.key);
        assert_eq!(first.user_id, user.id);
        assert_eq!(svc.resolve_token(&first.key).await.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn resolve_token_rejects_unknown_key() {
        let svc = service().await;
        let err = svc.resolve_token("nope").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn update_profile_rehashes_password() {
        let svc = service().await;
        let user = svc.register(registration("upd@example.com")).await.unwrap();

        let updated = svc
            .update_profile(
                &user.id,
                ProfileUpdate {
                    name: Some("Updated".into()),
                    password: Some("newpassword123".into()),
                    ..ProfileUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Updated");
        assert!(svc.hasher().verify("newpassword123", &updated.password_hash).await);
        assert!(!svc.hasher().verify("testpass123", &updated.password_hash).await);
    }

    #[tokio::test]
    async fn update_rejects_password_bcrypt_would_truncate() {
        let svc = service().await;
        let user = svc.register(registration("trunc@example.com")).await.unwrap();
        let too_long = format!("{}Y", "a".repeat(MAX_PASSWORD_BYTES));

        let err = svc
            .update_profile(
                &user.id,
                ProfileUpdate {
                    name: Some("Ignored".into()),
                    password: Some(too_long.clone()),
                    ..ProfileUpdate::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));

        let stored = svc.profile(&user.id).await.unwrap();
        assert_eq!(stored.name, user.name);
        assert!(svc.hasher().verify("testpass123", &stored.password_hash).await);
        assert!(matches!(
            svc.authenticate("trunc@example.com", &too_long).await,
            Err(DomainError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn update_without_password_keeps_hash() {
        let svc = service().await;
        let user = svc.register(registration("keep@example.com")).await.unwrap();

        let updated = svc
            .update_profile(
                &user.id,
                ProfileUpdate {
                    email: Some("Keep@NEW.example.com".into()),
                    ..ProfileUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.email, "Keep@new.example.com");
        assert_eq!(updated.password_hash, user.password_hash);
    }

    #[tokio::test]
    async fn update_rejects_email_of_another_user() {
        let svc = service().await;
        svc.register(registration("first@example.com")).await.unwrap();
        let second = svc.register(registration("second@example.com")).await.unwrap();

        let err = svc
            .update_profile(
                &second.id,
                ProfileUpdate {
                    email: Some("first@example.com".into()),
                    ..ProfileUpdate::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict { field: "email", .. }));

        // Re-submitting one's own email is fine.
        svc.update_profile(
            &second.id,
            ProfileUpdate {
                email: Some("second@example.com".into()),
                ..ProfileUpdate::default()
            },
        )
        .await
        .unwrap();
    }
}
