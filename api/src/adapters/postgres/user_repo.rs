//! PostgreSQL adapter for UserRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::{insert_error, update_error};
use crate::domain::entities::{NewUser, User, UserGroup, UserId};
use crate::domain::ports::UserRepository;
use crate::entity::users;
use crate::error::DomainError;

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find()
            .filter(users::Column::Nickname.eq(nickname))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find()
            .filter(users::Column::ApiKeyHash.eq(hash))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            nickname: Set(user.nickname.clone()),
            public_nickname: Set(user.public_nickname.clone()),
            password_hash: Set(user.password_hash.clone()),
            api_key_hash: Set(Some(user.api_key_hash.clone())),
            user_group: Set(user.group.to_string()),
            reputation: Set(0),
            created_at: Set(now),
            last_login_at: Set(Some(now)),
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            insert_error(e, format!("User with nickname '{}' already exists", user.nickname))
        })?;

        Ok(result.into())
    }

    async fn update_api_key_hash(
        &self,
        id: &UserId,
        hash: Option<&str>,
    ) -> Result<(), DomainError> {
        users::ActiveModel {
            id: Set(id.0),
            api_key_hash: Set(hash.map(str::to_string)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| update_error(e, format!("User not found: {}", id)))?;

        Ok(())
    }

    async fn update_last_login(&self, id: &UserId) -> Result<(), DomainError> {
        let now = Utc::now().fixed_offset();

        users::ActiveModel {
            id: Set(id.0),
            last_login_at: Set(Some(now)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| update_error(e, format!("User not found: {}", id)))?;

        Ok(())
    }

    async fn update_reputation(&self, id: &UserId, reputation: i32) -> Result<(), DomainError> {
        users::ActiveModel {
            id: Set(id.0),
            reputation: Set(reputation),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| update_error(e, format!("User not found: {}", id)))?;

        Ok(())
    }
}

/// Convert SeaORM model to domain entity
impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        User {
            id: UserId(model.id),
            nickname: model.nickname,
            public_nickname: model.public_nickname,
            password_hash: model.password_hash,
            api_key_hash: model.api_key_hash,
            group: model.user_group.parse().unwrap_or(UserGroup::User),
            reputation: model.reputation,
            created_at: model.created_at.with_timezone(&Utc),
            last_login_at: model.last_login_at.map(|t| t.with_timezone(&Utc)),
        }
    }
}
