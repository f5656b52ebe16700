//! PostgreSQL adapter for IssueRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::insert_error;
use crate::domain::entities::{Issue, IssueId, NewIssue};
use crate::domain::ports::IssueRepository;
use crate::entity::issues;
use crate::error::DomainError;

/// PostgreSQL implementation of IssueRepository
pub struct PostgresIssueRepository {
    db: DatabaseConnection,
}

impl PostgresIssueRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IssueRepository for PostgresIssueRepository {
    async fn list(&self) -> Result<Vec<Issue>, DomainError> {
        let results = issues::Entity::find()
            .order_by_desc(issues::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_id(&self, id: &IssueId) -> Result<Option<Issue>, DomainError> {
        let result = issues::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Issue>, DomainError> {
        let result = issues::Entity::find()
            .filter(issues::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, issue: &NewIssue) -> Result<Issue, DomainError> {
        let model = issues::ActiveModel {
            id: Set(Uuid::new_v4()),
            slug: Set(issue.slug.clone()),
            title: Set(issue.title.clone()),
            info: Set(issue.info.clone()),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            insert_error(e, format!("Issue with slug '{}' already exists", issue.slug))
        })?;

        Ok(result.into())
    }
}

/// Convert SeaORM model to domain entity
impl From<issues::Model> for Issue {
    fn from(model: issues::Model) -> Self {
        Issue {
            id: IssueId(model.id),
            slug: model.slug,
            title: model.title,
            info: model.info,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
