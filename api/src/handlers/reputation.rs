//! Reputation handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::ReputationHistory;
use crate::domain::entities::UserId;
use crate::error::AppError;
use crate::AppState;

const MAX_LIMIT: u64 = 200;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    50
}

/// GET /users/:id/reputation
///
/// Current score and a page of the reputation audit trail, newest first.
pub async fn get_reputation(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ReputationHistory>, AppError> {
    let history = state
        .reputation_service
        .history(&UserId(user_id), query.limit.min(MAX_LIMIT), query.offset)
        .await?;

    Ok(Json(history))
}
