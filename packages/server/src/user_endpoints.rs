//! User endpoints
//!
//! - `GET /api/users` - List users
//! - `POST /api/users` - Create a user
//! - `GET /api/users/:id` - Get a user by id
//! - `PATCH /api/users/:id` - Merge name and/or email
//! - `DELETE /api/users/:id` - Delete a user and everything they wrote

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use blog_graph_core::{NewUser, User, UserUpdate};

use crate::{AppState, CreatedResponse, HttpError};

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, HttpError> {
    let users = state.repository.list_users().await?;
    Ok(Json(users))
}

async fn create_user(
    State(state): State<AppState>,
    Json(user): Json<NewUser>,
) -> Result<(StatusCode, Json<CreatedResponse>), HttpError> {
    let id = state.repository.create_user(user).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, HttpError> {
    state
        .repository
        .get_user(&id)
        .await?
        .map(Json)
        .ok_or_else(|| HttpError::not_found("User", &id))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<UserUpdate>,
) -> Result<StatusCode, HttpError> {
    state.repository.update_user(&id, update).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Removes the user, their articles and their comments
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    state.repository.delete_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .with_state(state)
}
