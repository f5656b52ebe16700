//! PostgreSQL adapter for FlagRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::insert_error;
use crate::domain::entities::{
    FlagReason, FlagRecord, FlagRecordId, NewFlagRecord, ReviewItemId, StatementId, UserId,
};
use crate::domain::ports::FlagRepository;
use crate::entity::flag_records;
use crate::error::DomainError;

/// PostgreSQL implementation of FlagRepository
pub struct PostgresFlagRepository {
    db: DatabaseConnection,
}

impl PostgresFlagRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FlagRepository for PostgresFlagRepository {
    async fn create(&self, flag: &NewFlagRecord) -> Result<FlagRecord, DomainError> {
        let model = flag_records::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(flag.user_id.0),
            target_id: Set(flag.target_id.0),
            reason: Set(flag.reason.to_string()),
            review_id: Set(flag.review_id.0),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            insert_error(
                e,
                format!("User {} already flagged {}", flag.user_id, flag.target_id),
            )
        })?;

        Ok(result.into())
    }

    async fn find_by_user_and_target(
        &self,
        user_id: &UserId,
        target_id: &StatementId,
    ) -> Result<Option<FlagRecord>, DomainError> {
        let result = flag_records::Entity::find()
            .filter(flag_records::Column::UserId.eq(user_id.0))
            .filter(flag_records::Column::TargetId.eq(target_id.0))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }
}

/// Convert SeaORM model to domain entity
impl From<flag_records::Model> for FlagRecord {
    fn from(model: flag_records::Model) -> Self {
        FlagRecord {
            id: FlagRecordId(model.id),
            user_id: UserId(model.user_id),
            target_id: StatementId(model.target_id),
            reason: model.reason.parse().unwrap_or(FlagReason::Offtopic),
            review_id: ReviewItemId(model.review_id),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
