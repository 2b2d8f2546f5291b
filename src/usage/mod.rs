use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod services;

pub use services::UsageLedger;

pub fn router() -> Router<AppState> {
    handlers::usage_routes()
}
