use serde::{Deserialize, Serialize};

use super::repo_types::Solution;
use crate::solver::SolutionStep;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct SolveMathRequest {
    pub expression: String,
}

#[derive(Debug, Serialize)]
pub struct SolveMathResponse {
    pub steps: Vec<SolutionStep>,
    #[serde(rename = "final")]
    pub final_answer: String,
}

/// Raw `?page=&limit=`; kept as strings so junk falls back to defaults
/// instead of rejecting the request.
#[derive(Debug, Default)]
pub struct HistoryQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
}

impl HistoryQuery {
    /// Builds from raw query pairs; a repeated key keeps its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    pub fn window(&self) -> PageWindow {
        let page = parse(&self.page)
            .filter(|p| *p >= 1)
            .unwrap_or(DEFAULT_PAGE);
        let limit = parse(&self.limit)
            .filter(|l| (1..=MAX_LIMIT).contains(l))
            .unwrap_or(DEFAULT_LIMIT);
        PageWindow {
            page,
            limit,
            offset: (page - 1).saturating_mul(limit),
        }
    }
}

fn parse(raw: &Option<String>) -> Option<i64> {
    raw.as_deref().and_then(|v| v.parse::<i64>().ok())
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub solutions: Vec<Solution>,
    pub total: i64,
}
