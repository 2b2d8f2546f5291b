use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Stored solution. `steps_json` is the serialized step list, kept opaque.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Solution {
    pub id: Uuid,
    pub user_id: Uuid,
    pub expression: String,
    pub steps_json: String,
    pub final_answer: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(skip_serializing, default)]
    pub deleted_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSolution {
    pub user_id: Uuid,
    pub expression: String,
    pub steps_json: String,
    pub final_answer: String,
}
