//! Review handlers
//!
//! Queue overview, queue listings, flag intake, edit proposals and voting.
//! Duplicate flags, proposals and votes answer 200 with an informational
//! status instead of an error.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::{EditResult, FlagResult, ReviewEntry, ReviewOverview, VoteResult};
use crate::domain::entities::{ReviewItem, ReviewItemId, ReviewQueue, StatementId, User};
use crate::error::AppError;
use crate::AppState;

/// Request to flag a statement
#[derive(Debug, Deserialize)]
pub struct FlagRequest {
    pub statement_id: Uuid,
    /// offtopic, spam, harmful, optimization or duplicate
    pub reason: String,
    /// The original, required when reason is duplicate
    pub duplicate_of: Option<Uuid>,
}

/// Request to propose new text for a statement
#[derive(Debug, Deserialize)]
pub struct ProposeEditRequest {
    pub statement_id: Uuid,
    pub text: String,
}

/// Request to vote on a review item
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    /// true acknowledges the flag or edit, false keeps the statement as is
    pub should_apply: bool,
}

/// GET /review
pub async fn overview(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<ReviewOverview>, AppError> {
    Ok(Json(state.review_service.overview(&user).await?))
}

/// GET /review/:queue
pub async fn get_queue(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(queue): Path<String>,
) -> Result<Json<Vec<ReviewEntry>>, AppError> {
    let queue: ReviewQueue = queue.parse().map_err(AppError::NotFound)?;
    Ok(Json(state.review_service.queue(&user, queue).await?))
}

/// POST /review/flag
pub async fn flag(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<FlagRequest>,
) -> Result<Json<FlagResult>, AppError> {
    let result = state
        .review_service
        .flag(
            &user,
            &StatementId(request.statement_id),
            &request.reason,
            request.duplicate_of.map(StatementId),
        )
        .await?;

    Ok(Json(result))
}

/// POST /review/edit
pub async fn propose_edit(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<ProposeEditRequest>,
) -> Result<Json<EditResult>, AppError> {
    let result = state
        .review_service
        .propose_edit(&user, &StatementId(request.statement_id), &request.text)
        .await?;

    Ok(Json(result))
}

/// POST /review/:id/vote
pub async fn vote(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(review_id): Path<Uuid>,
    Json(request): Json<VoteRequest>,
) -> Result<Json<VoteResult>, AppError> {
    let result = state
        .review_service
        .vote(&user, &ReviewItemId(review_id), request.should_apply)
        .await?;

    Ok(Json(result))
}

/// POST /review/:id/cancel
pub async fn cancel(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(review_id): Path<Uuid>,
) -> Result<Json<ReviewItem>, AppError> {
    Ok(Json(
        state
            .review_service
            .cancel(&user, &ReviewItemId(review_id))
            .await?,
    ))
}

/// POST /review/:id/revoke
pub async fn revoke(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(review_id): Path<Uuid>,
) -> Result<Json<ReviewItem>, AppError> {
    Ok(Json(
        state
            .review_service
            .revoke(&user, &ReviewItemId(review_id))
            .await?,
    ))
}
