//! PostgreSQL adapter for ReputationEventRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::domain::entities::{
    NewReputationEvent, ReputationEvent, ReputationEventId, ReputationEventType, UserId,
};
use crate::domain::ports::ReputationEventRepository;
use crate::entity::reputation_events;
use crate::error::DomainError;

/// PostgreSQL implementation of ReputationEventRepository
pub struct PostgresReputationEventRepository {
    db: DatabaseConnection,
}

impl PostgresReputationEventRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReputationEventRepository for PostgresReputationEventRepository {
    async fn create(&self, event: &NewReputationEvent) -> Result<ReputationEvent, DomainError> {
        let model = reputation_events::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(event.user_id.0),
            event_type: Set(event.event_type.to_string()),
            delta: Set(event.delta),
            old_reputation: Set(event.old_reputation),
            new_reputation: Set(event.new_reputation),
            reference_id: Set(event.reference_id),
            details: Set(event.details.clone()),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn find_by_user(
        &self,
        user_id: &UserId,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<ReputationEvent>, DomainError> {
        let results = reputation_events::Entity::find()
            .filter(reputation_events::Column::UserId.eq(user_id.0))
            .order_by_desc(reputation_events::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_reference(
        &self,
        reference_id: Uuid,
    ) -> Result<Vec<ReputationEvent>, DomainError> {
        let results = reputation_events::Entity::find()
            .filter(reputation_events::Column::ReferenceId.eq(reference_id))
            .order_by_asc(reputation_events::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

/// Convert SeaORM model to domain entity
impl From<reputation_events::Model> for ReputationEvent {
    fn from(model: reputation_events::Model) -> Self {
        ReputationEvent {
            id: ReputationEventId(model.id),
            user_id: UserId(model.user_id),
            event_type: model
                .event_type
                .parse()
                .unwrap_or(ReputationEventType::NewStatement),
            delta: model.delta,
            old_reputation: model.old_reputation,
            new_reputation: model.new_reputation,
            reference_id: model.reference_id,
            details: model.details,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
