//! Comment endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use blog_graph_core::{Comment, CommentListing, CommentUpdate, NewComment};

use crate::{AppState, CreatedResponse, HttpError};

async fn list_comments(
    State(state): State<AppState>,
) -> Result<Json<Vec<CommentListing>>, HttpError> {
    Ok(Json(state.repository.list_comments().await?))
}

async fn create_comment(
    State(state): State<AppState>,
    Json(comment): Json<NewComment>,
) -> Result<(StatusCode, Json<CreatedResponse>), HttpError> {
    let id = state.repository.create_comment(comment).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Comment>, HttpError> {
    state
        .repository
        .get_comment(&id)
        .await?
        .map(Json)
        .ok_or_else(|| HttpError::not_found("Comment", &id))
}

/// Replaces text (when given) and re-links author and article
async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<CommentUpdate>,
) -> Result<StatusCode, HttpError> {
    state.repository.update_comment(&id, update).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    state.repository.delete_comment(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/comments", get(list_comments).post(create_comment))
        .route(
            "/api/comments/:id",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
        .with_state(state)
}
