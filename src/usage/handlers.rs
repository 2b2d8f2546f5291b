use axum::{extract::State, routing::get, Json, Router};
use tracing::{error, instrument};

use super::dto::UsageStatus;
use crate::{auth::extractors::AuthUser, error::ApiError, state::AppState};

pub fn usage_routes() -> Router<AppState> {
    Router::new()
        .route("/api/usage", get(get_usage_stats))
        .route("/api/usage/check", get(check_usage_limit))
}

#[instrument(skip(state, principal))]
pub async fn get_usage_stats(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> Result<Json<UsageStatus>, ApiError> {
    let usage = state.usage.get_stats(principal.user_id).await.map_err(|e| {
        error!(error = %e, user_id = %principal.user_id, "get usage stats failed");
        ApiError::Internal("Failed to get usage stats")
    })?;
    Ok(Json(usage))
}

#[instrument(skip(state, principal))]
pub async fn check_usage_limit(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> Result<Json<UsageStatus>, ApiError> {
    let usage = state.usage.check_limit(principal.user_id).await.map_err(|e| {
        error!(error = %e, user_id = %principal.user_id, "check usage limit failed");
        ApiError::Internal("Failed to check usage limit")
    })?;
    Ok(Json(usage))
}
