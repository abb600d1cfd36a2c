use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use super::{ApiError, AppState, BlogDto};
use crate::domain::{BlogDraft, BlogId};
use crate::services::BlogError;

/// Body of `POST /blogs` and `PUT /blogs/{id}`. Every field is optional on
/// the wire; which ones are required is decided by domain validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i32>,
}

impl From<BlogRequest> for BlogDraft {
    fn from(req: BlogRequest) -> Self {
        Self {
            title: req.title,
            author: req.author,
            url: req.url,
            likes: req.likes,
        }
    }
}

impl From<BlogError> for ApiError {
    fn from(err: BlogError) -> Self {
        match err {
            BlogError::Validation(violations) => violations.into(),
            BlogError::NotFound(id) => Self::not_found("Blog", id),
            BlogError::Database(msg) => Self::database(msg),
            BlogError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// `GET /api/blogs`
pub async fn list_blogs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BlogDto>>, ApiError> {
    let blogs = state.blog_service().list().await?;
    Ok(Json(blogs.into_iter().map(BlogDto::from).collect()))
}

/// `GET /api/blogs/{id}`
///
/// A malformed id is a bad request; a well-formed id with no blog is 404.
pub async fn get_blog(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<BlogDto>, ApiError> {
    let id: BlogId = raw_id.parse().map_err(|_| ApiError::malformed_id(&raw_id))?;
    let blog = state.blog_service().get(id).await?;
    Ok(Json(blog.into()))
}

/// `POST /api/blogs`
pub async fn create_blog(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BlogRequest>,
) -> Result<(StatusCode, Json<BlogDto>), ApiError> {
    let blog = state.blog_service().create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(blog.into())))
}

/// `PUT /api/blogs/{id}`
///
/// Any id that does not resolve to a stored blog, malformed or not, is
/// reported as a bad request rather than 404.
pub async fn update_blog(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    Json(payload): Json<BlogRequest>,
) -> Result<Json<BlogDto>, ApiError> {
    let id: BlogId = raw_id.parse().map_err(|_| ApiError::malformed_id(&raw_id))?;

    match state.blog_service().update(id, payload.into()).await {
        Ok(blog) => Ok(Json(blog.into())),
        Err(BlogError::NotFound(_)) => Err(ApiError::malformed_id(&raw_id)),
        Err(err) => Err(err.into()),
    }
}

/// `DELETE /api/blogs/{id}`
///
/// Always 204 for missing or malformed ids; only store failures surface.
pub async fn delete_blog(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let Ok(id) = raw_id.parse::<BlogId>() else {
        debug!(raw_id = %raw_id, "Ignoring delete for malformed blog id");
        return Ok(StatusCode::NO_CONTENT);
    };

    state.blog_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
