//! Tag and category endpoints
//!
//! Both vocabularies share the same shape: `GET`/`POST` on the collection and
//! `GET`/`PATCH`/`DELETE` on a single entry. Deleting an entry detaches it
//! from every article first.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use blog_graph_core::{Category, NewCategory, NewTag, Tag, TaxonomyUpdate};

use crate::{AppState, CreatedResponse, HttpError};

async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<Tag>>, HttpError> {
    Ok(Json(state.repository.list_tags().await?))
}

async fn create_tag(
    State(state): State<AppState>,
    Json(tag): Json<NewTag>,
) -> Result<(StatusCode, Json<CreatedResponse>), HttpError> {
    let id = state.repository.create_tag(tag).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Tag>, HttpError> {
    state
        .repository
        .get_tag(&id)
        .await?
        .map(Json)
        .ok_or_else(|| HttpError::not_found("Tag", &id))
}

async fn update_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<TaxonomyUpdate>,
) -> Result<StatusCode, HttpError> {
    state.repository.update_tag(&id, update).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    state.repository.delete_tag(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, HttpError> {
    Ok(Json(state.repository.list_categories().await?))
}

async fn create_category(
    State(state): State<AppState>,
    Json(category): Json<NewCategory>,
) -> Result<(StatusCode, Json<CreatedResponse>), HttpError> {
    let id = state.repository.create_category(category).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Category>, HttpError> {
    state
        .repository
        .get_category(&id)
        .await?
        .map(Json)
        .ok_or_else(|| HttpError::not_found("Category", &id))
}

async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<TaxonomyUpdate>,
) -> Result<StatusCode, HttpError> {
    state.repository.update_category(&id, update).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    state.repository.delete_category(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/tags", get(list_tags).post(create_tag))
        .route(
            "/api/tags/:id",
            get(get_tag).patch(update_tag).delete(delete_tag),
        )
        .route("/api/categories", get(list_categories).post(create_category))
        .route(
            "/api/categories/:id",
            get(get_category)
                .patch(update_category)
                .delete(delete_category),
        )
        .with_state(state)
}
