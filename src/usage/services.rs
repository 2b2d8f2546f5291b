use std::sync::Arc;

use anyhow::Context;
use time::{format_description::well_known::Rfc3339, Duration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use super::{dto::UsageStatus, repo::UsageRepo};
use crate::clock::Clock;

/// Solve requests allowed per user per local calendar day.
pub const DAILY_LIMIT: i32 = 10;

/// Daily quota accounting on top of a [`UsageRepo`].
///
/// Rows are keyed by `(user, local date)`, so the counter "resets" simply by
/// the date rolling over; nothing ever deletes or zeroes a row.
#[derive(Clone)]
pub struct UsageLedger {
    repo: Arc<dyn UsageRepo>,
    clock: Arc<dyn Clock>,
}

impl UsageLedger {
    pub fn new(repo: Arc<dyn UsageRepo>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Current usage for today. Goes through [`UsageRepo::ensure_day`], so the
    /// first check of a day persists a zero row; an existing count is never
    /// changed.
    pub async fn check_limit(&self, user_id: Uuid) -> anyhow::Result<UsageStatus> {
        let now = self.clock.now();
        let count = self
            .repo
            .ensure_day(user_id, now.date())
            .await
            .with_context(|| format!("check usage for {user_id} on {}", now.date()))?;
        status_at(count, now)
    }

    /// Consume one unit of today's quota and return the post-increment state.
    pub async fn increment_usage(&self, user_id: Uuid) -> anyhow::Result<UsageStatus> {
        let now = self.clock.now();
        let count = self
            .repo
            .increment(user_id, now.date())
            .await
            .with_context(|| format!("increment usage for {user_id} on {}", now.date()))?;
        debug!(%user_id, day = %now.date(), count, "usage incremented");
        status_at(count, now)
    }

    pub async fn get_stats(&self, user_id: Uuid) -> anyhow::Result<UsageStatus> {
        self.check_limit(user_id).await
    }
}

/// Start of the calendar day after `now`, in the same offset.
pub fn next_reset(now: OffsetDateTime) -> OffsetDateTime {
    now.date()
        .saturating_add(Duration::DAY)
        .midnight()
        .assume_offset(now.offset())
}

fn status_at(count: i32, now: OffsetDateTime) -> anyhow::Result<UsageStatus> {
    let reset_time = next_reset(now)
        .format(&Rfc3339)
        .context("format reset time")?;
    Ok(UsageStatus {
        count,
        limit: DAILY_LIMIT,
        exceeded: count >= DAILY_LIMIT,
        reset_time,
    })
}
