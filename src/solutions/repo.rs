use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{NewSolution, Solution};

/// Append-only solution history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SolutionRepo: Send + Sync {
    async fn insert(&self, new: NewSolution) -> anyhow::Result<Solution>;
    async fn count_by_user(&self, user_id: Uuid) -> anyhow::Result<i64>;
    /// Newest first.
    async fn list_by_user(&self, user_id: Uuid, limit: i64, offset: i64) -> anyhow::Result<Vec<Solution>>;
}

#[derive(Clone)]
pub struct PgSolutionRepo {
    db: PgPool,
}

impl PgSolutionRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SolutionRepo for PgSolutionRepo {
    async fn insert(&self, new: NewSolution) -> anyhow::Result<Solution> {
        let row = sqlx::query_as::<_, Solution>(
            r#"
            INSERT INTO solutions (id, user_id, expression, steps_json, final_answer)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, expression, steps_json, final_answer,
                      created_at, updated_at, deleted_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(&new.expression)
        .bind(&new.steps_json)
        .bind(&new.final_answer)
        .fetch_one(&self.db)
        .await
        .context("insert solution")?;
        Ok(row)
    }

    async fn count_by_user(&self, user_id: Uuid) -> anyhow::Result<i64> {
        let (total,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
              FROM solutions
             WHERE user_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await
        .context("count solutions")?;
        Ok(total)
    }

    async fn list_by_user(&self, user_id: Uuid, limit: i64, offset: i64) -> anyhow::Result<Vec<Solution>> {
        let rows = sqlx::query_as::<_, Solution>(
            r#"
            SELECT id, user_id, expression, steps_json, final_answer,
                   created_at, updated_at, deleted_at
              FROM solutions
             WHERE user_id = $1 AND deleted_at IS NULL
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .context("list solutions")?;
        Ok(rows)
    }
}
