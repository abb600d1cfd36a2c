use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, AppState, UserDto};
use crate::domain::{UserDraft, Violations};
use crate::services::UserError;

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

impl From<CreateUserRequest> for UserDraft {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            username: req.username,
            name: req.name,
            password: req.password,
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(violations) => violations.into(),
            UserError::UsernameTaken(_) => {
                Violations::single("username", "username must be unique").into()
            }
            UserError::Database(msg) => Self::database(msg),
            UserError::Hashing(msg) | UserError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// `GET /api/users`
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    let users = state.user_service().list().await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

/// `POST /api/users`
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    let user = state.user_service().create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}
