//! Actions and the pure reducer
//!
//! Every state change is an [`Action`] applied by [`reduce`]. Completions
//! carry the [`RequestId`] of the operation they finish, which makes
//! interleavings of concurrent operations replayable in tests.

use std::collections::HashSet;

use super::state::{
    DashboardState, Operation, Phase, RequestId, StalePolicy, STATUS_BOOT_FAILED,
    STATUS_GENERATING, STATUS_SEEDED, STATUS_SEEDING,
};
use crate::insights::{Cohort, Insight, Session};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    BootStarted {
        request: RequestId,
    },
    BootFinished {
        request: RequestId,
        session: Session,
        insights: Vec<Insight>,
    },
    /// Login or initial fetch failed. `session` is set when login worked.
    BootFailed {
        request: RequestId,
        session: Option<Session>,
    },
    GenerateStarted {
        request: RequestId,
    },
    GenerateFinished {
        request: RequestId,
        insights: Vec<Insight>,
    },
    SeedStarted {
        request: RequestId,
    },
    SeedFinished {
        request: RequestId,
    },
    /// Operation ended in an error its caller handles; state keeps its text
    RequestAbandoned {
        request: RequestId,
    },
    SelectCohort(Cohort),
}

impl Action {
    pub fn started(operation: Operation, request: RequestId) -> Self {
        match operation {
            Operation::Boot => Action::BootStarted { request },
            Operation::Generate => Action::GenerateStarted { request },
            Operation::Seed => Action::SeedStarted { request },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::BootStarted { .. } => "boot_started",
            Action::BootFinished { .. } => "boot_finished",
            Action::BootFailed { .. } => "boot_failed",
            Action::GenerateStarted { .. } => "generate_started",
            Action::GenerateFinished { .. } => "generate_finished",
            Action::SeedStarted { .. } => "seed_started",
            Action::SeedFinished { .. } => "seed_finished",
            Action::RequestAbandoned { .. } => "request_abandoned",
            Action::SelectCohort(_) => "select_cohort",
        }
    }
}

/// Apply `action` to `state`, returning the next state
pub fn reduce(state: &DashboardState, action: Action, policy: StalePolicy) -> DashboardState {
    let mut next = state.clone();

    match action {
        Action::BootStarted { request } => {
            next.in_flight.push((request, Operation::Boot));
        }
        Action::BootFinished {
            request,
            session,
            insights,
        } => {
            if complete(&mut next, request, policy) {
                next.session = Some(session);
                next.insights = unique_by_id(insights);
                next.status.clear();
                next.settled = Phase::Ready;
            }
        }
        Action::BootFailed { request, session } => {
            if complete(&mut next, request, policy) {
                if session.is_some() {
                    next.session = session;
                }
                next.status = STATUS_BOOT_FAILED.to_string();
                next.settled = Phase::Unauthenticated;
            }
        }
        Action::GenerateStarted { request } => {
            next.in_flight.push((request, Operation::Generate));
            next.status = STATUS_GENERATING.to_string();
        }
        Action::GenerateFinished { request, insights } => {
            if complete(&mut next, request, policy) {
                next.insights = unique_by_id(insights);
                next.status.clear();
                next.settled = Phase::Ready;
            }
        }
        Action::SeedStarted { request } => {
            next.in_flight.push((request, Operation::Seed));
            next.status = STATUS_SEEDING.to_string();
        }
        Action::SeedFinished { request } => {
            if complete(&mut next, request, policy) {
                next.status = STATUS_SEEDED.to_string();
            }
        }
        Action::RequestAbandoned { request } => {
            next.in_flight.retain(|(id, _)| *id != request);
        }
        Action::SelectCohort(cohort) => {
            next.cohort = cohort;
        }
    }

    next
}

/// Remove `request` from the in-flight list and decide whether its writes
/// apply. Records it as the newest applied completion when they do.
fn complete(state: &mut DashboardState, request: RequestId, policy: StalePolicy) -> bool {
    state.in_flight.retain(|(id, _)| *id != request);

    let accepted = match policy {
        StalePolicy::LastWriteWins => true,
        StalePolicy::DiscardStale => state.last_applied.map_or(true, |last| request > last),
    };

    if accepted {
        state.last_applied = Some(state.last_applied.map_or(request, |last| last.max(request)));
    } else {
        tracing::debug!(%request, "Discarding stale completion");
    }

    accepted
}

/// Keep the first occurrence of each insight id
fn unique_by_id(insights: Vec<Insight>) -> Vec<Insight> {
    let mut seen = HashSet::with_capacity(insights.len());
    let total = insights.len();

    let unique: Vec<Insight> = insights
        .into_iter()
        .filter(|insight| seen.insert(insight.id))
        .collect();

    if unique.len() != total {
        tracing::warn!(
            dropped = total - unique.len(),
            "Server returned duplicate insight ids"
        );
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn insight(id: i64, cohort: &str) -> Insight {
        Insight {
            id,
            kind: "pattern".to_string(),
            score: 0.5,
            payload: json!({ "cohort": cohort }).as_object().cloned().unwrap(),
            created_at: "2024-01-01T00:00:00".to_string(),
            explanation: None,
        }
    }

    fn apply(state: DashboardState, actions: Vec<Action>, policy: StalePolicy) -> DashboardState {
        actions
            .into_iter()
            .fold(state, |state, action| reduce(&state, action, policy))
    }

    fn booted() -> DashboardState {
        apply(
            DashboardState::default(),
            vec![
                Action::BootStarted { request: RequestId(1) },
                Action::BootFinished {
                    request: RequestId(1),
                    session: Session::new("token"),
                    insights: vec![insight(1, "cohort_0")],
                },
            ],
            StalePolicy::LastWriteWins,
        )
    }

    #[test]
    fn test_initial_state() {
        let state = DashboardState::default();
        assert_eq!(state.phase(), Phase::Booting);
        assert!(state.insights().is_empty());
        assert!(!state.is_authenticated());
        assert_eq!(state.cohort(), Cohort::All);
        assert_eq!(state.status(), "");
    }

    #[test]
    fn test_boot_success_is_ready() {
        let state = booted();
        assert_eq!(state.phase(), Phase::Ready);
        assert!(state.is_authenticated());
        assert_eq!(state.insights().len(), 1);
        assert_eq!(state.status(), "");
    }

    #[test]
    fn test_boot_failure_is_unauthenticated() {
        let state = apply(
            DashboardState::default(),
            vec![
                Action::BootStarted { request: RequestId(1) },
                Action::BootFailed { request: RequestId(1), session: None },
            ],
            StalePolicy::LastWriteWins,
        );
        assert_eq!(state.phase(), Phase::Unauthenticated);
        assert_eq!(state.status(), STATUS_BOOT_FAILED);
        assert!(state.insights().is_empty());
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_fetch_failure_after_login_keeps_session() {
        let state = apply(
            DashboardState::default(),
            vec![
                Action::BootStarted { request: RequestId(1) },
                Action::BootFailed {
                    request: RequestId(1),
                    session: Some(Session::new("token")),
                },
            ],
            StalePolicy::LastWriteWins,
        );
        assert_eq!(state.phase(), Phase::Unauthenticated);
        assert!(state.is_authenticated());
    }

    #[test]
    fn test_generate_cycle() {
        let state = reduce(
            &booted(),
            Action::GenerateStarted { request: RequestId(2) },
            StalePolicy::LastWriteWins,
        );
        assert_eq!(state.phase(), Phase::Generating);
        assert_eq!(state.status(), STATUS_GENERATING);

        let state = reduce(
            &state,
            Action::GenerateFinished {
                request: RequestId(2),
                insights: vec![insight(5, "cohort_1"), insight(6, "cohort_2")],
            },
            StalePolicy::LastWriteWins,
        );
        assert_eq!(state.phase(), Phase::Ready);
        assert_eq!(state.status(), "");
        assert_eq!(state.insights().len(), 2);
    }

    #[test]
    fn test_seed_status_survives_cohort_change() {
        let state = apply(
            booted(),
            vec![
                Action::SeedStarted { request: RequestId(2) },
                Action::SeedFinished { request: RequestId(2) },
                Action::SelectCohort(Cohort::Cohort1),
            ],
            StalePolicy::LastWriteWins,
        );
        assert_eq!(state.status(), STATUS_SEEDED);
        assert_eq!(state.phase(), Phase::Ready);
    }

    #[test]
    fn test_seed_from_booting_returns_to_booting() {
        let state = apply(
            DashboardState::default(),
            vec![
                Action::SeedStarted { request: RequestId(1) },
                Action::SeedFinished { request: RequestId(1) },
            ],
            StalePolicy::LastWriteWins,
        );
        assert_eq!(state.phase(), Phase::Booting);
        assert_eq!(state.status(), STATUS_SEEDED);
    }

    #[test]
    fn test_abandoned_request_keeps_status() {
        let state = apply(
            booted(),
            vec![
                Action::GenerateStarted { request: RequestId(2) },
                Action::RequestAbandoned { request: RequestId(2) },
            ],
            StalePolicy::LastWriteWins,
        );
        assert_eq!(state.phase(), Phase::Ready);
        assert_eq!(state.in_flight(), 0);
        assert_eq!(state.status(), STATUS_GENERATING);
        assert_eq!(state.insights().len(), 1);
    }

    #[test]
    fn test_phase_follows_latest_started_request() {
        let state = apply(
            booted(),
            vec![
                Action::GenerateStarted { request: RequestId(2) },
                Action::SeedStarted { request: RequestId(3) },
            ],
            StalePolicy::LastWriteWins,
        );
        assert_eq!(state.phase(), Phase::Seeding);

        let state = reduce(
            &state,
            Action::SeedFinished { request: RequestId(3) },
            StalePolicy::LastWriteWins,
        );
        assert_eq!(state.phase(), Phase::Generating);
    }

    fn out_of_order_generates() -> Vec<Action> {
        vec![
            Action::GenerateStarted { request: RequestId(2) },
            Action::GenerateStarted { request: RequestId(3) },
            Action::GenerateFinished {
                request: RequestId(3),
                insights: vec![insight(30, "cohort_0")],
            },
            Action::GenerateFinished {
                request: RequestId(2),
                insights: vec![insight(20, "cohort_0")],
            },
        ]
    }

    #[test]
    fn test_last_write_wins_applies_late_stale_response() {
        let state = apply(booted(), out_of_order_generates(), StalePolicy::LastWriteWins);
        assert_eq!(state.insights()[0].id, 20);
        assert_eq!(state.in_flight(), 0);
    }

    #[test]
    fn test_discard_stale_keeps_newer_response() {
        let state = apply(booted(), out_of_order_generates(), StalePolicy::DiscardStale);
        assert_eq!(state.insights()[0].id, 30);
        assert_eq!(state.in_flight(), 0);
        assert_eq!(state.phase(), Phase::Ready);
    }

    #[test]
    fn test_discard_stale_drops_older_status_write() {
        let state = apply(
            booted(),
            vec![
                Action::GenerateStarted { request: RequestId(2) },
                Action::SeedStarted { request: RequestId(3) },
                Action::SeedFinished { request: RequestId(3) },
                Action::GenerateFinished {
                    request: RequestId(2),
                    insights: vec![],
                },
            ],
            StalePolicy::DiscardStale,
        );
        assert_eq!(state.status(), STATUS_SEEDED);
        assert_eq!(state.insights().len(), 1);
    }

    #[test]
    fn test_duplicate_ids_are_dropped() {
        let state = reduce(
            &booted(),
            Action::GenerateFinished {
                request: RequestId(2),
                insights: vec![insight(1, "cohort_0"), insight(2, "cohort_1"), insight(1, "cohort_2")],
            },
            StalePolicy::LastWriteWins,
        );
        let ids: Vec<i64> = state.insights().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(state.insights()[0].payload["cohort"], "cohort_0");
    }

    #[test]
    fn test_select_cohort_filters_view_only() {
        let state = reduce(
            &booted(),
            Action::GenerateFinished {
                request: RequestId(2),
                insights: vec![insight(1, "cohort_0"), insight(2, "cohort_1"), insight(3, "cohort_0")],
            },
            StalePolicy::LastWriteWins,
        );
        let state = reduce(&state, Action::SelectCohort(Cohort::Cohort0), StalePolicy::LastWriteWins);

        assert_eq!(state.insights().len(), 3);
        let visible: Vec<i64> = state.visible_insights().iter().map(|i| i.id).collect();
        assert_eq!(visible, vec![1, 3]);
    }
}
