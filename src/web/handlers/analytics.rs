// GET /api/analytics: dashboard aggregates over a trailing window.
//
// ?days= sets the window for the interactions-over-time series (default 30).
// Top topics, total and language counts always cover every record.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::dashboard::{summarize, DEFAULT_WINDOW_DAYS};
use crate::web::{api_error, internal_error, AppState};

#[derive(Deserialize, Default)]
pub struct AnalyticsQuery {
    pub days: Option<u32>,
}

pub async fn get_analytics(
    State(state): State<AppState>,
    params: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> Response {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => return api_error(StatusCode::BAD_REQUEST, &rejection.body_text()),
    };
    let days = params.days.unwrap_or(DEFAULT_WINDOW_DAYS);
    match summarize(state.db.as_ref(), days, Utc::now()).await {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => internal_error("Failed to fetch analytics", e),
    }
}
