use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use super::{Solver, SolverError, SolverOutput};

#[derive(Debug, Serialize)]
struct SolveRequest<'a> {
    expression: &'a str,
}

/// Reqwest-backed solver calling `POST {base_url}/solve`.
#[derive(Clone)]
pub struct HttpSolver {
    client: Client,
    endpoint: String,
}

impl HttpSolver {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/solve", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl Solver for HttpSolver {
    async fn solve(&self, expression: &str) -> Result<SolverOutput, SolverError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&SolveRequest { expression })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            warn!(%status, "solver returned non-success status");
            return Err(SolverError::ServiceError {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let output: SolverOutput = serde_json::from_slice(&body)
            .map_err(|e| SolverError::DecodeError(e.to_string()))?;
        debug!(steps = output.steps.len(), "solver answered");
        Ok(output)
    }
}

fn map_transport_error(error: reqwest::Error) -> SolverError {
    if error.is_timeout() {
        SolverError::Timeout(error.to_string())
    } else {
        SolverError::Transport(error.to_string())
    }
}
