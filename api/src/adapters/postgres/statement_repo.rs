//! PostgreSQL adapter for StatementRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::update_error;
use crate::domain::entities::{
    IssueId, NewStatement, Statement, StatementId, StatementKind, UserId,
};
use crate::domain::ports::StatementRepository;
use crate::entity::statements;
use crate::error::DomainError;

/// PostgreSQL implementation of StatementRepository
pub struct PostgresStatementRepository {
    db: DatabaseConnection,
}

impl PostgresStatementRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StatementRepository for PostgresStatementRepository {
    async fn find_by_id(&self, id: &StatementId) -> Result<Option<Statement>, DomainError> {
        let result = statements::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn list_by_issue(
        &self,
        issue_id: &IssueId,
        include_disabled: bool,
    ) -> Result<Vec<Statement>, DomainError> {
        let mut query = statements::Entity::find()
            .filter(statements::Column::IssueId.eq(issue_id.0));

        if !include_disabled {
            query = query.filter(statements::Column::IsDisabled.eq(false));
        }

        let results = query
            .order_by_asc(statements::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, statement: &NewStatement) -> Result<Statement, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = statements::ActiveModel {
            id: Set(Uuid::new_v4()),
            issue_id: Set(statement.issue_id.0),
            author_id: Set(statement.author_id.0),
            kind: Set(statement.kind.to_string()),
            text: Set(statement.text.clone()),
            is_disabled: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn set_disabled(&self, id: &StatementId, disabled: bool) -> Result<(), DomainError> {
        statements::ActiveModel {
            id: Set(id.0),
            is_disabled: Set(disabled),
            updated_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| update_error(e, format!("Statement not found: {}", id)))?;

        Ok(())
    }

    async fn update_text(&self, id: &StatementId, text: &str) -> Result<(), DomainError> {
        statements::ActiveModel {
            id: Set(id.0),
            text: Set(text.to_string()),
            updated_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| update_error(e, format!("Statement not found: {}", id)))?;

        Ok(())
    }

    async fn count_by_author_and_kind(
        &self,
        author_id: &UserId,
        kind: StatementKind,
    ) -> Result<i64, DomainError> {
        let count = statements::Entity::find()
            .filter(statements::Column::AuthorId.eq(author_id.0))
            .filter(statements::Column::Kind.eq(kind.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(count as i64)
    }
}

/// Convert SeaORM model to domain entity
impl From<statements::Model> for Statement {
    fn from(model: statements::Model) -> Self {
        Statement {
            id: StatementId(model.id),
            issue_id: IssueId(model.issue_id),
            author_id: UserId(model.author_id),
            kind: model.kind.parse().unwrap_or(StatementKind::Premise),
            text: model.text,
            is_disabled: model.is_disabled,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}
