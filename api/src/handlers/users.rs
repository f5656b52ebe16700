//! User handlers
//!
//! Registration, login and logout.

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::domain::entities::User;
use crate::error::AppError;
use crate::AppState;

/// Request body for registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub nickname: String,
    pub password: String,
    /// Name shown next to statements; defaults to the nickname
    pub public_nickname: Option<String>,
}

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub nickname: String,
    pub password: String,
}

/// Credentials returned by registration and login
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub nickname: String,
    pub public_nickname: String,
    pub group: String,
    pub reputation: i32,
    /// API key for later calls (Authorization: Bearer <api_key>)
    pub api_key: String,
}

impl SessionResponse {
    fn new(user: User, api_key: String) -> Self {
        Self {
            id: user.id.to_string(),
            nickname: user.nickname,
            public_nickname: user.public_nickname,
            group: user.group.to_string(),
            reputation: user.reputation,
            api_key,
        }
    }
}

/// POST /users/register
///
/// Create an account. The API key is only shown in this response and on login.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let (user, api_key) = state
        .user_service
        .register(
            &request.nickname,
            &request.password,
            request.public_nickname.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(SessionResponse::new(user, api_key))))
}

/// POST /ajax_user_login
///
/// Exchange nickname and password for a fresh API key. Older keys stop working.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let (user, api_key) = state
        .user_service
        .login(&request.nickname, &request.password)
        .await?;

    Ok(Json(SessionResponse::new(user, api_key)))
}

/// POST /ajax_user_logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<StatusCode, AppError> {
    state.user_service.logout(&user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
