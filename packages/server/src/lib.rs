//! HTTP/JSON front end for the blog graph repository
//!
//! Every route delegates to one [`BlogRepository`] operation. Endpoint
//! modules each contribute a `routes(state)` router that is merged here.
//!
//! # Endpoints
//!
//! - `user_endpoints`: `/api/users`
//! - `article_endpoints`: `/api/articles`
//! - `taxonomy_endpoints`: `/api/tags`, `/api/categories`
//! - `comment_endpoints`: `/api/comments`

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    response::Json,
    routing::get,
    Router,
};
use blog_graph_core::BlogRepository;
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

mod article_endpoints;
mod comment_endpoints;
mod http_error;
mod taxonomy_endpoints;
mod user_endpoints;

pub use http_error::HttpError;

/// Application state shared across all endpoints
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<BlogRepository>,
}

impl AppState {
    pub fn new(repository: Arc<BlogRepository>) -> Self {
        Self { repository }
    }
}

/// Body returned by create endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create the application router with all endpoint modules
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(user_endpoints::routes(state.clone()))
        .merge(article_endpoints::routes(state.clone()))
        .merge(taxonomy_endpoints::routes(state.clone()))
        .merge(comment_endpoints::routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

/// Bind `host:port` and serve the router until `shutdown` resolves
pub async fn start_server(
    state: AppState,
    host: &str,
    port: u16,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Blog server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Blog server stopped");
    Ok(())
}

/// CORS layer for browser clients
///
/// Origins come from `BLOG_CORS_ALLOW_ORIGIN` (comma separated). When unset
/// any origin is accepted.
fn cors_layer() -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    match std::env::var("BLOG_CORS_ALLOW_ORIGIN") {
        Ok(raw) => {
            let origins: Vec<HeaderValue> = raw
                .split(',')
                .map(str::trim)
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                        None
                    }
                })
                .collect();
            layer.allow_origin(origins)
        }
        Err(_) => layer.allow_origin(Any),
    }
}
