//! Issue handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::domain::entities::{Issue, IssueLookup, User};
use crate::error::AppError;
use crate::AppState;

/// Request to create a new issue
#[derive(Debug, Deserialize)]
pub struct CreateIssueRequest {
    pub title: String,
    #[serde(default)]
    pub info: String,
}

/// GET /issues
pub async fn list_issues(State(state): State<AppState>) -> Result<Json<Vec<Issue>>, AppError> {
    Ok(Json(state.discussion_service.list_issues().await?))
}

/// GET /issues/lookup?uid=&slug=&title=
///
/// Every given field must match the same issue.
pub async fn lookup_issue(
    State(state): State<AppState>,
    Query(lookup): Query<IssueLookup>,
) -> Result<Json<Issue>, AppError> {
    Ok(Json(state.discussion_service.lookup_issue(&lookup).await?))
}

/// POST /issues
pub async fn create_issue(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateIssueRequest>,
) -> Result<(StatusCode, Json<Issue>), AppError> {
    let issue = state
        .discussion_service
        .create_issue(&user, &request.title, &request.info)
        .await?;

    Ok((StatusCode::CREATED, Json(issue)))
}
