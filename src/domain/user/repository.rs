use async_trait::async_trait;

use super::{AuthToken, NewUser, ProfileChanges, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    /// Insert a user. A duplicate email surfaces as `DomainError::Integrity`.
    async fn create_user(&self, user: NewUser) -> DomainResult<User>;

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn count_users(&self) -> DomainResult<u64>;

    /// Apply `changes` atomically; `None` when the user does not exist.
    async fn update_user(&self, id: &str, changes: ProfileChanges) -> DomainResult<Option<User>>;
}

#[async_trait]
pub trait TokenRepositoryInterface: Send + Sync {
    /// Return the user's existing token, or store `candidate_key` as a new one.
    async fn get_or_create(&self, user_id: &str, candidate_key: &str) -> DomainResult<AuthToken>;

    /// Resolve a presented key to its owner.
    async fn find_user_by_key(&self, key: &str) -> DomainResult<Option<User>>;
}
