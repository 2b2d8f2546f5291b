//! Contract with the external AI math solver.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod client;

pub use client::HttpSolver;

/// One rendered step of a solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionStep {
    pub index: i32,
    pub latex: String,
}

/// Step-by-step answer returned by the solver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverOutput {
    pub steps: Vec<SolutionStep>,
    #[serde(rename = "final")]
    pub final_answer: String,
}

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("AI service timed out: {0}")]
    Timeout(String),

    #[error("failed to call AI service: {0}")]
    Transport(String),

    #[error("AI service returned status {status}: {body}")]
    ServiceError { status: u16, body: String },

    #[error("failed to decode AI service response: {0}")]
    DecodeError(String),
}

/// Single attempt per call; no retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Solver: Send + Sync {
    async fn solve(&self, expression: &str) -> Result<SolverOutput, SolverError>;
}
