//! State Management
//!
//! The dashboard store behind a Leptos signal.

use leptos::*;

use signal_noise::insights::{Cohort, Session};
use signal_noise::store::{Action, DashboardState, Dispatcher, RequestId, StalePolicy, Store};

/// Reactive handle on the dashboard store, provided to all components
#[derive(Clone, Copy)]
pub struct UiStore(RwSignal<Store>);

impl UiStore {
    pub fn new(policy: StalePolicy) -> Self {
        Self(create_rw_signal(Store::new(policy)))
    }

    /// Tracked read of the dashboard state
    pub fn with<T>(&self, f: impl FnOnce(&DashboardState) -> T) -> T {
        self.0.with(|store| f(store.state()))
    }

    pub fn select_cohort(&self, cohort: Cohort) {
        self.dispatch(Action::SelectCohort(cohort));
    }
}

impl Dispatcher for UiStore {
    fn next_request_id(&self) -> RequestId {
        // Allocating an id changes nothing visible
        let mut request = RequestId(0);
        self.0.update_untracked(|store| request = store.next_request_id());
        request
    }

    fn dispatch(&self, action: Action) {
        self.0.update(|store| store.dispatch(action));
    }

    fn session(&self) -> Option<Session> {
        self.0.with_untracked(|store| store.state().session().cloned())
    }
}

/// Create the store and provide it to the component tree
pub fn provide_ui_store() -> UiStore {
    let store = UiStore::new(StalePolicy::default());
    provide_context(store);
    store
}

/// Store provided by [`provide_ui_store`]
pub fn use_ui_store() -> UiStore {
    expect_context::<UiStore>()
}
