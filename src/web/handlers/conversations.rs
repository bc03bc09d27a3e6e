// Conversation CRUD handlers.
//
// GET    /api/conversations: page of records, ?limit= (default 100) and ?offset=
// POST   /api/conversations: validate, tag and store one record
// GET    /api/conversations/{id}: single record
// DELETE /api/conversations/{id}: remove a record
//
// Validation happens before anything touches the database, so a 400 never
// leaves a partial write behind.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::dashboard::{conversation_page, DEFAULT_PAGE_LIMIT};
use crate::db::models::ConversationInput;
use crate::pipeline::ingest::store_draft;
use crate::web::{api_error, internal_error, AppState};

#[derive(Deserialize, Default)]
pub struct ListQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// GET /api/conversations: newest first, with pagination metadata.
pub async fn list_conversations(
    State(state): State<AppState>,
    params: Result<Query<ListQuery>, QueryRejection>,
) -> Response {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => return api_error(StatusCode::BAD_REQUEST, &rejection.body_text()),
    };
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    let offset = params.offset.unwrap_or(0);

    match conversation_page(state.db.as_ref(), limit, offset).await {
        Ok(page) => Json(page).into_response(),
        Err(e) => internal_error("Failed to fetch conversations", e),
    }
}

/// POST /api/conversations: 201 with the stored record.
pub async fn create_conversation(
    State(state): State<AppState>,
    payload: Result<Json<ConversationInput>, JsonRejection>,
) -> Response {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => return api_error(StatusCode::BAD_REQUEST, &rejection.body_text()),
    };

    let draft = match input.validate(Utc::now()) {
        Ok(draft) => draft,
        Err(e) => return api_error(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    match store_draft(state.db.as_ref(), state.extractor.as_ref(), &draft).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => internal_error("Failed to create conversation", e),
    }
}

/// GET /api/conversations/{id}
pub async fn get_conversation(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return api_error(StatusCode::BAD_REQUEST, &rejection.body_text()),
    };
    match state.db.get_conversation(id).await {
        Ok(Some(record)) => Json(record).into_response(),
        Ok(None) => api_error(StatusCode::NOT_FOUND, "Conversation not found"),
        Err(e) => internal_error("Failed to fetch conversation", e),
    }
}

/// DELETE /api/conversations/{id}
pub async fn delete_conversation(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return api_error(StatusCode::BAD_REQUEST, &rejection.body_text()),
    };
    match state.db.delete_conversation(id).await {
        Ok(true) => Json(serde_json::json!({ "success": true })).into_response(),
        Ok(false) => api_error(StatusCode::NOT_FOUND, "Conversation not found"),
        Err(e) => internal_error("Failed to delete conversation", e),
    }
}
