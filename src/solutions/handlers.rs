use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{HistoryQuery, HistoryResponse, SolveMathRequest, SolveMathResponse},
    services::{history_page, solve_expression},
};
use crate::{auth::extractors::AuthUser, error::ApiError, state::AppState};

pub fn solve_routes() -> Router<AppState> {
    Router::new()
        .route("/api/solve-math", post(solve_math))
        // legacy path kept for older clients
        .route("/solve-math", post(solve_math))
}

pub fn history_routes() -> Router<AppState> {
    Router::new().route("/api/history", get(get_history))
}

#[instrument(skip(state, principal, payload))]
pub async fn solve_math(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    payload: Result<Json<SolveMathRequest>, JsonRejection>,
) -> Result<Json<SolveMathResponse>, ApiError> {
    let Json(payload) = payload?;
    if payload.expression.trim().is_empty() {
        return Err(ApiError::Validation("expression is required".into()));
    }

    let res = solve_expression(&state, &principal, &payload.expression).await?;
    Ok(Json(res))
}

#[instrument(skip(state, principal))]
pub async fn get_history(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<HistoryResponse>, ApiError> {
    // paging is lenient: an unreadable query string means defaults, never a 400
    let query = query
        .map(|Query(pairs)| HistoryQuery::from_pairs(pairs))
        .unwrap_or_default();
    let res = history_page(&state, &principal, query.window()).await?;
    Ok(Json(res))
}
