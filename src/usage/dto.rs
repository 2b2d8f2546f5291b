use serde::{Deserialize, Serialize};

/// Usage snapshot returned by `/api/usage`, `/api/usage/check` and 429 bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStatus {
    pub count: i32,
    pub limit: i32,
    pub exceeded: bool,
    pub reset_time: String, // RFC 3339, next local midnight
}
