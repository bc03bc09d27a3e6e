// Web server: Axum-based JSON API for the analytics dashboard.
//
// All /api/* routes serve JSON. Errors are `{"error": message}` with a 4xx
// status for bad input and missing records, 500 for storage failures.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::db::Database;
use crate::topics::traits::TopicExtractor;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
    pub extractor: Arc<dyn TopicExtractor>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(
    db: Arc<dyn Database>,
    extractor: Arc<dyn TopicExtractor>,
    port: u16,
    bind: &str,
) -> Result<()> {
    let app = build_router(AppState { db, extractor });

    let addr = format!("{bind}:{port}");
    info!("Convolog API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/conversations",
            get(handlers::conversations::list_conversations)
                .post(handlers::conversations::create_conversation),
        )
        .route(
            "/api/conversations/{id}",
            get(handlers::conversations::get_conversation)
                .delete(handlers::conversations::delete_conversation),
        )
        .route("/api/analyze-topic", post(handlers::analyze::analyze_one))
        .route("/api/analyze-topic/all", post(handlers::analyze::analyze_all))
        .route("/api/analytics", get(handlers::analytics::get_analytics))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness check: always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}

/// Log a storage failure and turn it into a 500 with a generic message.
pub fn internal_error(context: &str, err: anyhow::Error) -> Response {
    error!(error = ?err, "{context}");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, context)
}
