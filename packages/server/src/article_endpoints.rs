//! Article endpoints
//!
//! `GET /api/articles` returns the listing with author names; the bare
//! id/title projection lives under `/api/articles/summaries`. `PUT` rebuilds
//! the author, tag and category edges from the request body.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use blog_graph_core::{
    Article, ArticleListing, ArticleSummary, ArticleUpdate, CommentListing, NewArticle,
};

use crate::{AppState, CreatedResponse, HttpError};

async fn list_articles(
    State(state): State<AppState>,
) -> Result<Json<Vec<ArticleListing>>, HttpError> {
    let articles = state.repository.list_articles_with_author().await?;
    Ok(Json(articles))
}

async fn list_article_summaries(
    State(state): State<AppState>,
) -> Result<Json<Vec<ArticleSummary>>, HttpError> {
    let summaries = state.repository.list_articles().await?;
    Ok(Json(summaries))
}

async fn create_article(
    State(state): State<AppState>,
    Json(article): Json<NewArticle>,
) -> Result<(StatusCode, Json<CreatedResponse>), HttpError> {
    let id = state.repository.create_article(article).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Article>, HttpError> {
    state
        .repository
        .get_article(&id)
        .await?
        .map(Json)
        .ok_or_else(|| HttpError::not_found("Article", &id))
}

async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<ArticleUpdate>,
) -> Result<StatusCode, HttpError> {
    state.repository.update_article(&id, update).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    state.repository.delete_article(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_article_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CommentListing>>, HttpError> {
    let comments = state.repository.list_article_comments(&id).await?;
    Ok(Json(comments))
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/articles", get(list_articles).post(create_article))
        .route("/api/articles/summaries", get(list_article_summaries))
        .route(
            "/api/articles/:id",
            get(get_article).put(update_article).delete(delete_article),
        )
        .route("/api/articles/:id/comments", get(list_article_comments))
        .with_state(state)
}
