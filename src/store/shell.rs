//! Orchestration
//!
//! Async sequences behind the dashboard's lifecycle and buttons. Each one
//! allocates a request id, dispatches a start action, awaits the backend and
//! dispatches the matching completion. No lock is held across an await, so
//! overlapping sequences interleave freely and the store's
//! [`StalePolicy`](super::StalePolicy) decides which completion wins.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::reducer::Action;
use super::state::{DashboardState, Operation, RequestId};
use super::Store;
use crate::client::{ClientError, ClientResult, Failure, InsightsApi, DEFAULT_INSIGHT_LIMIT};
use crate::insights::{Clock, Cohort, GenerateWindow, Insight, Session};

/// Handle through which orchestration reads and updates the store
pub trait Dispatcher {
    fn next_request_id(&self) -> RequestId;

    fn dispatch(&self, action: Action);

    /// Session currently held, if any
    fn session(&self) -> Option<Session>;

    /// Allocate a request id and dispatch the start action for `operation`
    fn begin(&self, operation: Operation) -> RequestId {
        let request = self.next_request_id();
        self.dispatch(Action::started(operation, request));
        request
    }
}

/// Inputs of the boot and generate sequences
#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    pub username: String,
    pub password: String,
    pub insight_limit: u32,
    /// Length of the trailing generation window
    pub window_days: i64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            username: "demo".to_string(),
            password: "demo".to_string(),
            insight_limit: DEFAULT_INSIGHT_LIMIT,
            window_days: 7,
        }
    }
}

/// Log in with the configured credentials, then fetch insights.
///
/// Failures are absorbed: the store ends up `Unauthenticated` with a generic
/// status message, and the cause is logged.
pub async fn boot<A, D>(api: &A, store: &D, config: &ShellConfig)
where
    A: InsightsApi + ?Sized,
    D: Dispatcher + ?Sized,
{
    let request = store.begin(Operation::Boot);

    let session = match api.login(&config.username, &config.password).await {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(%request, error = %e, "Boot failed at login");
            store.dispatch(Action::BootFailed {
                request,
                session: None,
            });
            return;
        }
    };

    match api.fetch_insights(&session, config.insight_limit).await {
        Ok(insights) => {
            tracing::info!(%request, count = insights.len(), "Dashboard ready");
            store.dispatch(Action::BootFinished {
                request,
                session,
                insights,
            });
        }
        Err(e) => {
            tracing::warn!(%request, error = %e, "Boot failed at fetch");
            store.dispatch(Action::BootFailed {
                request,
                session: Some(session),
            });
        }
    }
}

/// Ask the backend to generate insights for the trailing window, then
/// refetch. A no-op without a session.
///
/// Errors are returned to the caller after the request is marked abandoned;
/// the status message is left as it was.
pub async fn generate<A, C, D>(api: &A, clock: &C, store: &D, config: &ShellConfig) -> ClientResult<()>
where
    A: InsightsApi + ?Sized,
    C: Clock + ?Sized,
    D: Dispatcher + ?Sized,
{
    let Some(session) = store.session() else {
        tracing::debug!("Generate ignored: not logged in");
        return Ok(());
    };

    let request = store.begin(Operation::Generate);

    match generate_then_fetch(api, clock, &session, config).await {
        Ok(insights) => {
            tracing::info!(%request, count = insights.len(), "Insights regenerated");
            store.dispatch(Action::GenerateFinished { request, insights });
            Ok(())
        }
        Err(e) => {
            store.dispatch(Action::RequestAbandoned { request });
            Err(e)
        }
    }
}

async fn generate_then_fetch<A, C>(
    api: &A,
    clock: &C,
    session: &Session,
    config: &ShellConfig,
) -> ClientResult<Vec<Insight>>
where
    A: InsightsApi + ?Sized,
    C: Clock + ?Sized,
{
    let window = GenerateWindow::trailing(clock.now(), config.window_days).ok_or_else(|| {
        ClientError::Generate(Failure::Request(format!(
            "no {}-day window ends at the current time",
            config.window_days
        )))
    })?;
    api.generate_insights(session, &window).await?;
    api.fetch_insights(session, config.insight_limit).await
}

/// Ask the backend to load demonstration data. Needs no session.
///
/// Errors are returned to the caller after the request is marked abandoned.
pub async fn seed<A, D>(api: &A, store: &D) -> ClientResult<()>
where
    A: InsightsApi + ?Sized,
    D: Dispatcher + ?Sized,
{
    let request = store.begin(Operation::Seed);

    match api.seed_demo().await {
        Ok(()) => {
            tracing::info!(%request, "Demo data seeded");
            store.dispatch(Action::SeedFinished { request });
            Ok(())
        }
        Err(e) => {
            store.dispatch(Action::RequestAbandoned { request });
            Err(e)
        }
    }
}

/// Store shared between tasks
#[derive(Debug, Clone, Default)]
pub struct SharedStore(Arc<Mutex<Store>>);

impl SharedStore {
    pub fn new(store: Store) -> Self {
        Self(Arc::new(Mutex::new(store)))
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        // Reducer calls cannot leave the store half-written
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> DashboardState {
        self.lock().state().clone()
    }

    pub fn select_cohort(&self, cohort: Cohort) {
        self.dispatch(Action::SelectCohort(cohort));
    }
}

impl Dispatcher for SharedStore {
    fn next_request_id(&self) -> RequestId {
        self.lock().next_request_id()
    }

    fn dispatch(&self, action: Action) {
        self.lock().dispatch(action);
    }

    fn session(&self) -> Option<Session> {
        self.lock().state().session().cloned()
    }
}
