//! Discussion handlers
//!
//! Reading an issue's statements, posting new ones and searching.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::{Discussion, PostedStatement, SearchMode};
use crate::domain::entities::{StatementId, StatementKind, User};
use crate::domain::ports::SearchHit;
use crate::error::AppError;
use crate::AppState;

/// Request to post a statement
#[derive(Debug, Deserialize)]
pub struct PostStatementRequest {
    /// position, premise or argument
    pub kind: String,
    pub text: String,
}

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub mode: SearchMode,
    pub statement: Option<Uuid>,
    /// For suggestions: complete positions instead of premises
    #[serde(default)]
    pub position: bool,
    #[serde(default)]
    pub search: String,
}

/// GET /discuss/:slug
pub async fn discuss(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Discussion>, AppError> {
    Ok(Json(state.discussion_service.discuss(&slug).await?))
}

/// POST /discuss/:slug/statements
pub async fn post_statement(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(slug): Path<String>,
    Json(request): Json<PostStatementRequest>,
) -> Result<(StatusCode, Json<PostedStatement>), AppError> {
    let kind: StatementKind = request.kind.parse().map_err(AppError::BadRequest)?;

    let posted = state
        .discussion_service
        .post_statement(&user, &slug, kind, &request.text)
        .await?;

    Ok((StatusCode::CREATED, Json(posted)))
}

/// GET /discuss/:slug/search?mode=&statement=&search=
pub async fn search(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchHit>>, AppError> {
    let hits = state
        .discussion_service
        .search(
            &slug,
            params.mode,
            params.statement.map(StatementId),
            params.position,
            &params.search,
        )
        .await?;

    Ok(Json(hits))
}
