use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

/// Per-user, per-day request counters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsageRepo: Send + Sync {
    /// Create the `(user, day)` row with count 0 if missing; return the stored count.
    async fn ensure_day(&self, user_id: Uuid, day: Date) -> anyhow::Result<i32>;

    /// Atomically add one to the `(user, day)` row, creating it at 1 if missing.
    async fn increment(&self, user_id: Uuid, day: Date) -> anyhow::Result<i32>;
}

#[derive(Clone)]
pub struct PgUsageRepo {
    db: PgPool,
}

impl PgUsageRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UsageRepo for PgUsageRepo {
    async fn ensure_day(&self, user_id: Uuid, day: Date) -> anyhow::Result<i32> {
        sqlx::query(
            r#"
            INSERT INTO usage_limits (user_id, date, count)
            VALUES ($1, $2, 0)
            ON CONFLICT (user_id, date) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(day)
        .execute(&self.db)
        .await
        .context("ensure usage row")?;

        let (count,): (i32,) = sqlx::query_as(
            r#"
            SELECT count
              FROM usage_limits
             WHERE user_id = $1 AND date = $2
            "#,
        )
        .bind(user_id)
        .bind(day)
        .fetch_one(&self.db)
        .await
        .context("read usage row")?;

        Ok(count)
    }

    async fn increment(&self, user_id: Uuid, day: Date) -> anyhow::Result<i32> {
        let (count,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO usage_limits (user_id, date, count)
            VALUES ($1, $2, 1)
            ON CONFLICT (user_id, date)
            DO UPDATE SET count = usage_limits.count + 1, updated_at = now()
            RETURNING count
            "#,
        )
        .bind(user_id)
        .bind(day)
        .fetch_one(&self.db)
        .await
        .context("increment usage row")?;

        Ok(count)
    }
}
