//! Dashboard state and its identifiers

use serde::Deserialize;
use std::fmt;

use crate::insights::{filter_by_cohort, Cohort, Insight, Session};

pub const STATUS_BOOT_FAILED: &str = "Login or fetch failed";
pub const STATUS_GENERATING: &str = "Generating insights...";
pub const STATUS_SEEDING: &str = "Seeding demo data...";
pub const STATUS_SEEDED: &str = "Demo data seeded";

/// Sequence number handed out when an operation starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Long-running operations the dashboard can have in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Boot,
    Generate,
    Seed,
}

impl Operation {
    fn phase(self) -> Phase {
        match self {
            Operation::Boot => Phase::Booting,
            Operation::Generate => Phase::Generating,
            Operation::Seed => Phase::Seeding,
        }
    }
}

/// Coarse state of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Booting,
    Unauthenticated,
    Ready,
    Generating,
    Seeding,
}

/// What to do with a completion that arrives after a newer one was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Apply every completion in arrival order
    #[default]
    LastWriteWins,
    /// Drop completions older than the newest applied one
    DiscardStale,
}

/// Everything the dashboard renders from
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub(crate) session: Option<Session>,
    pub(crate) insights: Vec<Insight>,
    pub(crate) cohort: Cohort,
    pub(crate) status: String,
    /// Phase to show when nothing is in flight
    pub(crate) settled: Phase,
    /// Started operations, oldest first
    pub(crate) in_flight: Vec<(RequestId, Operation)>,
    /// Newest completion whose writes were applied
    pub(crate) last_applied: Option<RequestId>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            session: None,
            insights: Vec::new(),
            cohort: Cohort::All,
            status: String::new(),
            settled: Phase::Booting,
            in_flight: Vec::new(),
            last_applied: None,
        }
    }
}

impl DashboardState {
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Full fetched sequence, in server order
    pub fn insights(&self) -> &[Insight] {
        &self.insights
    }

    pub fn cohort(&self) -> Cohort {
        self.cohort
    }

    /// Current status message; empty when cleared
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Phase of the most recently started in-flight operation, or the
    /// settled phase when nothing is running
    pub fn phase(&self) -> Phase {
        self.in_flight
            .last()
            .map(|(_, operation)| operation.phase())
            .unwrap_or(self.settled)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Insights visible under the selected cohort
    pub fn visible_insights(&self) -> Vec<Insight> {
        filter_by_cohort(&self.insights, self.cohort)
    }
}
