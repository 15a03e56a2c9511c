use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::db_err;
use super::user_repository::user_model_to_domain;
use crate::domain::{AuthToken, DomainError, DomainResult, TokenRepositoryInterface, User};
use crate::infrastructure::database::entities::{auth_token, user};

pub struct TokenRepository {
    db: DatabaseConnection,
}

impl TokenRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_by_user(&self, user_id: &str) -> DomainResult<Option<auth_token::Model>> {
        auth_token::Entity::find()
            .filter(auth_token::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err)
    }
}

fn token_model_to_domain(model: auth_token::Model) -> AuthToken {
    AuthToken {
        key: model.key,
        user_id: model.user_id,
        created_at: model.created_at,
    }
}

#[async_trait]
impl TokenRepositoryInterface for TokenRepository {
    async fn get_or_create(&self, user_id: &str, candidate_key: &str) -> DomainResult<AuthToken> {
        if let Some(existing) = self.find_by_user(user_id).await? {
            return Ok(token_model_to_domain(existing));
        }

        let model = auth_token::ActiveModel {
            key: Set(candidate_key.to_string()),
            user_id: Set(user_id.to_string()),
            created_at: Set(Utc::now()),
        };

        match model.insert(&self.db).await {
            Ok(inserted) => Ok(token_model_to_domain(inserted)),
            Err(e) => {
                // A concurrent request may have created the token first.
                match self.find_by_user(user_id).await? {
                    Some(existing) => Ok(token_model_to_domain(existing)),
                    None => Err(DomainError::Storage(e.to_string())),
                }
            }
        }
    }

    async fn find_user_by_key(&self, key: &str) -> DomainResult<Option<User>> {
        let found = auth_token::Entity::find_by_id(key)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(found.and_then(|(_, owner)| owner).map(user_model_to_domain))
    }
}
