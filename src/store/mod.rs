//! Dashboard State Container
//!
//! Session, insights, cohort selection and status live in one
//! [`DashboardState`], changed only through [`reduce`]. The [`Store`] owns
//! the state, hands out request ids and applies actions; the orchestration
//! functions in [`shell`] drive it through the [`Dispatcher`] trait so the
//! same sequences run against a mutex-guarded store natively and a reactive
//! signal in the browser.
//!
//! ## Lifecycle
//!
//! 1. `boot` logs in with the demo credentials and fetches insights
//! 2. `generate` asks the backend for a trailing window, then refetches
//! 3. `seed` loads demonstration data
//! 4. `SelectCohort` narrows the visible insights without touching the list

mod reducer;
pub mod shell;
mod state;

pub use reducer::{reduce, Action};
pub use shell::{boot, generate, seed, Dispatcher, SharedStore, ShellConfig};
pub use state::{
    DashboardState, Operation, Phase, RequestId, StalePolicy, STATUS_BOOT_FAILED,
    STATUS_GENERATING, STATUS_SEEDED, STATUS_SEEDING,
};

/// Owns the dashboard state and applies actions in order
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: DashboardState,
    policy: StalePolicy,
    next_request: u64,
}

impl Store {
    pub fn new(policy: StalePolicy) -> Self {
        Self {
            state: DashboardState::default(),
            policy,
            next_request: 0,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    /// Allocate the id for an operation about to start
    pub fn next_request_id(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(action = action.name(), "Dispatching");
        self.state = reduce(&self.state, action, self.policy);
    }
}
