//! PostgreSQL adapter for ReviewItemRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr,
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::{insert_error, update_error};
use crate::domain::entities::{
    NewReviewItem, ReviewItem, ReviewItemId, ReviewKind, ReviewOutcome, ReviewState,
    StatementId, UserId,
};
use crate::domain::ports::ReviewItemRepository;
use crate::entity::review_items;
use crate::error::DomainError;

/// PostgreSQL implementation of ReviewItemRepository
pub struct PostgresReviewItemRepository {
    db: DatabaseConnection,
}

impl PostgresReviewItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewItemRepository for PostgresReviewItemRepository {
    async fn find_by_id(&self, id: &ReviewItemId) -> Result<Option<ReviewItem>, DomainError> {
        let result = review_items::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, item: &NewReviewItem) -> Result<ReviewItem, DomainError> {
        let model = review_items::ActiveModel {
            id: Set(Uuid::new_v4()),
            target_statement_id: Set(item.target_statement_id.0),
            kind: Set(item.kind.to_string()),
            state: Set(ReviewState::Pending.to_string()),
            outcome: Set(None),
            detector_id: Set(item.detector_id.0),
            reason: Set(item.reason.clone()),
            proposed_text: Set(item.proposed_text.clone()),
            previous_text: Set(None),
            duplicate_of: Set(item.duplicate_of.map(|id| id.0)),
            created_at: Set(Utc::now().fixed_offset()),
            resolved_at: Set(None),
        };

        // The partial unique index allows one pending item per statement and kind
        let result = model.insert(&self.db).await.map_err(|e| {
            insert_error(
                e,
                format!(
                    "A pending {} review already exists for statement {}",
                    item.kind, item.target_statement_id
                ),
            )
        })?;

        Ok(result.into())
    }

    async fn find_pending_for_target(
        &self,
        target_id: &StatementId,
        kind: ReviewKind,
    ) -> Result<Option<ReviewItem>, DomainError> {
        let result = review_items::Entity::find()
            .filter(review_items::Column::TargetStatementId.eq(target_id.0))
            .filter(review_items::Column::Kind.eq(kind.to_string()))
            .filter(review_items::Column::State.eq(ReviewState::Pending.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn list_by_state(
        &self,
        state: ReviewState,
        kind: Option<ReviewKind>,
    ) -> Result<Vec<ReviewItem>, DomainError> {
        let mut query =
            review_items::Entity::find().filter(review_items::Column::State.eq(state.to_string()));

        if let Some(kind) = kind {
            query = query.filter(review_items::Column::Kind.eq(kind.to_string()));
        }

        let results = query
            .order_by_asc(review_items::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn list_resolved(&self, limit: u64) -> Result<Vec<ReviewItem>, DomainError> {
        let results = review_items::Entity::find()
            .filter(review_items::Column::State.ne(ReviewState::Pending.to_string()))
            .order_by_desc(review_items::Column::ResolvedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn count_by_state(&self, state: ReviewState) -> Result<i64, DomainError> {
        let count = review_items::Entity::find()
            .filter(review_items::Column::State.eq(state.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(count as i64)
    }

    async fn list_by_target(
        &self,
        target_id: &StatementId,
    ) -> Result<Vec<ReviewItem>, DomainError> {
        let results = review_items::Entity::find()
            .filter(review_items::Column::TargetStatementId.eq(target_id.0))
            .order_by_asc(review_items::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn transition_state(
        &self,
        id: &ReviewItemId,
        from: ReviewState,
        to: ReviewState,
        outcome: Option<ReviewOutcome>,
    ) -> Result<bool, DomainError> {
        let mut update = review_items::Entity::update_many()
            .col_expr(review_items::Column::State, Expr::value(to.to_string()))
            .col_expr(
                review_items::Column::Outcome,
                Expr::value(outcome.map(|o| o.to_string())),
            );

        if from == ReviewState::Pending {
            update = update.col_expr(
                review_items::Column::ResolvedAt,
                Expr::value(Some(Utc::now().fixed_offset())),
            );
        }

        // UPDATE ... WHERE id = $1 AND state = $2: only one caller wins the move
        let result = update
            .filter(review_items::Column::Id.eq(id.0))
            .filter(review_items::Column::State.eq(from.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected == 1)
    }

    async fn set_previous_text(&self, id: &ReviewItemId, text: &str) -> Result<(), DomainError> {
        review_items::ActiveModel {
            id: Set(id.0),
            previous_text: Set(Some(text.to_string())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| update_error(e, format!("Review item not found: {}", id)))?;

        Ok(())
    }
}

/// Convert SeaORM model to domain entity
impl From<review_items::Model> for ReviewItem {
    fn from(model: review_items::Model) -> Self {
        ReviewItem {
            id: ReviewItemId(model.id),
            target_statement_id: StatementId(model.target_statement_id),
            kind: model.kind.parse().unwrap_or(ReviewKind::Delete),
            state: model.state.parse().unwrap_or(ReviewState::Pending),
            outcome: model.outcome.and_then(|o| o.parse().ok()),
            detector_id: UserId(model.detector_id),
            reason: model.reason,
            proposed_text: model.proposed_text,
            previous_text: model.previous_text,
            duplicate_of: model.duplicate_of.map(StatementId),
            created_at: model.created_at.with_timezone(&Utc),
            resolved_at: model.resolved_at.map(|t| t.with_timezone(&Utc)),
        }
    }
}
