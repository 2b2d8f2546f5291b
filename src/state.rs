use std::sync::Arc;

use crate::{
    auth::repo::{PgUserRepo, UserRepo},
    clock::{Clock, SystemClock},
    config::AppConfig,
    db,
    solutions::repo::{PgSolutionRepo, SolutionRepo},
    solver::{HttpSolver, Solver},
    usage::{
        repo::{PgUsageRepo, UsageRepo},
        UsageLedger,
    },
};

/// Everything a handler needs, constructed once and injected via axum state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepo>,
    pub solutions: Arc<dyn SolutionRepo>,
    pub usage: UsageLedger,
    pub solver: Arc<dyn Solver>,
}

impl AppState {
    /// Production wiring: Postgres repositories and the HTTP solver.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let pool = db::connect(&config.database_url).await?;
        db::migrate(&pool).await;

        let solver = Arc::new(HttpSolver::new(
            &config.solver.base_url,
            config.solver.timeout,
        )?) as Arc<dyn Solver>;
        let clock = Arc::new(SystemClock::new(config.local_offset)) as Arc<dyn Clock>;

        Ok(Self::from_parts(
            Arc::new(config),
            Arc::new(PgUserRepo::new(pool.clone())),
            Arc::new(PgSolutionRepo::new(pool.clone())),
            Arc::new(PgUsageRepo::new(pool)),
            solver,
            clock,
        ))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserRepo>,
        solutions: Arc<dyn SolutionRepo>,
        usage: Arc<dyn UsageRepo>,
        solver: Arc<dyn Solver>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            users,
            solutions,
            usage: UsageLedger::new(usage, clock),
            solver,
        }
    }
}
