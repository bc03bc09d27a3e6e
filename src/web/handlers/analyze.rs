// Topic analysis handlers.
//
// POST /api/analyze-topic: {"id": n}: recompute one record's topic
// POST /api/analyze-topic/all: tag every record that has no topic yet

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::pipeline::{ingest, reanalyze};
use crate::web::{api_error, internal_error, AppState};

#[derive(Deserialize, Default)]
pub struct AnalyzeRequest {
    /// An integer, or a string holding one (`"5"`).
    pub id: Option<serde_json::Value>,
}

impl AnalyzeRequest {
    /// The requested id, or the message for a 400.
    fn conversation_id(&self) -> Result<i64, &'static str> {
        match &self.id {
            None | Some(serde_json::Value::Null) => Err("Conversation ID is required"),
            Some(serde_json::Value::Number(n)) => n.as_i64().ok_or(INVALID_ID),
            Some(serde_json::Value::String(s)) => s.trim().parse().map_err(|_| INVALID_ID),
            Some(_) => Err(INVALID_ID),
        }
    }
}

const INVALID_ID: &str = "Conversation ID must be an integer";

/// POST /api/analyze-topic
pub async fn analyze_one(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return api_error(StatusCode::BAD_REQUEST, &rejection.body_text()),
    };
    let id = match request.conversation_id() {
        Ok(id) => id,
        Err(message) => return api_error(StatusCode::BAD_REQUEST, message),
    };

    match ingest::analyze_conversation(state.db.as_ref(), state.extractor.as_ref(), id).await {
        Ok(Some(record)) => Json(serde_json::json!({
            "success": true,
            "topic": record.topic,
            "conversation": record,
        }))
        .into_response(),
        Ok(None) => api_error(StatusCode::NOT_FOUND, "Conversation not found"),
        Err(e) => internal_error("Failed to analyze topic", e),
    }
}

/// POST /api/analyze-topic/all
pub async fn analyze_all(State(state): State<AppState>) -> impl IntoResponse {
    match reanalyze::run(state.db.as_ref(), state.extractor.as_ref(), false).await {
        Ok(results) => Json(serde_json::json!({
            "success": true,
            "analyzed": results.len(),
            "results": results,
        }))
        .into_response(),
        Err(e) => internal_error("Failed to analyze topics", e),
    }
}
