//! PostgreSQL adapter for ReviewVoteRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::insert_error;
use crate::domain::entities::{NewReviewVote, ReviewItemId, ReviewVote, ReviewVoteId, UserId};
use crate::domain::ports::ReviewVoteRepository;
use crate::entity::review_votes;
use crate::error::DomainError;

/// PostgreSQL implementation of ReviewVoteRepository
pub struct PostgresReviewVoteRepository {
    db: DatabaseConnection,
}

impl PostgresReviewVoteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewVoteRepository for PostgresReviewVoteRepository {
    async fn create(&self, vote: &NewReviewVote) -> Result<ReviewVote, DomainError> {
        let model = review_votes::ActiveModel {
            id: Set(Uuid::new_v4()),
            review_id: Set(vote.review_id.0),
            reviewer_id: Set(vote.reviewer_id.0),
            is_okay: Set(vote.is_okay),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            insert_error(
                e,
                format!(
                    "User {} already voted on review {}",
                    vote.reviewer_id, vote.review_id
                ),
            )
        })?;

        Ok(result.into())
    }

    async fn list_by_review(
        &self,
        review_id: &ReviewItemId,
    ) -> Result<Vec<ReviewVote>, DomainError> {
        let results = review_votes::Entity::find()
            .filter(review_votes::Column::ReviewId.eq(review_id.0))
            .order_by_asc(review_votes::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn exists_for_review_and_reviewer(
        &self,
        review_id: &ReviewItemId,
        reviewer_id: &UserId,
    ) -> Result<bool, DomainError> {
        let count = review_votes::Entity::find()
            .filter(review_votes::Column::ReviewId.eq(review_id.0))
            .filter(review_votes::Column::ReviewerId.eq(reviewer_id.0))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    async fn list_review_ids_by_reviewer(
        &self,
        reviewer_id: &UserId,
    ) -> Result<Vec<ReviewItemId>, DomainError> {
        let ids: Vec<Uuid> = review_votes::Entity::find()
            .filter(review_votes::Column::ReviewerId.eq(reviewer_id.0))
            .select_only()
            .column(review_votes::Column::ReviewId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(ids.into_iter().map(ReviewItemId).collect())
    }
}

/// Convert SeaORM model to domain entity
impl From<review_votes::Model> for ReviewVote {
    fn from(model: review_votes::Model) -> Self {
        ReviewVote {
            id: ReviewVoteId(model.id),
            review_id: ReviewItemId(model.review_id),
            reviewer_id: UserId(model.reviewer_id),
            is_okay: model.is_okay,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
