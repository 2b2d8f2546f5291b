use tracing::{debug, error, info, warn};

use super::{
    dto::{HistoryResponse, PageWindow, SolveMathResponse},
    repo_types::NewSolution,
};
use crate::{auth::claims::Principal, error::ApiError, state::AppState};

/// Quota check, solver call, best-effort persistence, quota consumption.
///
/// Quota is consumed only after the solver succeeds. The history insert and
/// the usage increment are independent writes whose failures are logged and
/// swallowed: the caller still gets the solution.
pub async fn solve_expression(
    state: &AppState,
    principal: &Principal,
    expression: &str,
) -> Result<SolveMathResponse, ApiError> {
    let user_id = principal.user_id;

    let usage = state.usage.check_limit(user_id).await.map_err(|e| {
        error!(error = %e, %user_id, "usage check failed");
        ApiError::Internal("Failed to check usage limit")
    })?;
    if usage.exceeded {
        warn!(%user_id, count = usage.count, "daily limit reached");
        return Err(ApiError::QuotaExceeded(usage));
    }

    let output = state.solver.solve(expression).await.map_err(|e| {
        warn!(error = %e, %user_id, "solver call failed");
        ApiError::Upstream(e)
    })?;

    let steps_json = serde_json::to_string(&output.steps).map_err(|e| {
        error!(error = %e, %user_id, "serialize steps failed");
        ApiError::Internal("Failed to process solution")
    })?;

    let record = NewSolution {
        user_id,
        expression: expression.to_string(),
        steps_json,
        final_answer: output.final_answer.clone(),
    };
    if let Err(e) = state.solutions.insert(record).await {
        error!(error = %e, %user_id, "saving solution history failed; continuing");
    }

    match state.usage.increment_usage(user_id).await {
        Ok(after) => info!(%user_id, count = after.count, "expression solved"),
        Err(e) => error!(error = %e, %user_id, "usage increment failed; continuing"),
    }

    Ok(SolveMathResponse {
        steps: output.steps,
        final_answer: output.final_answer,
    })
}

pub async fn history_page(
    state: &AppState,
    principal: &Principal,
    window: PageWindow,
) -> Result<HistoryResponse, ApiError> {
    let user_id = principal.user_id;
    debug!(%user_id, page = window.page, limit = window.limit, "loading history");

    let total = state.solutions.count_by_user(user_id).await.map_err(|e| {
        error!(error = %e, %user_id, "count solutions failed");
        ApiError::Internal("Failed to count solutions")
    })?;

    let solutions = state
        .solutions
        .list_by_user(user_id, window.limit, window.offset)
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, "list solutions failed");
            ApiError::Internal("Failed to fetch solutions")
        })?;

    Ok(HistoryResponse { solutions, total })
}
