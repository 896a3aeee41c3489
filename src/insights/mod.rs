//! Insight Domain
//!
//! Types shared by every front end: the insight records returned by the
//! backend, the closed set of cohorts used for client-side filtering, and
//! the trailing time window sent when asking the backend to generate.

mod filter;
mod types;
mod window;

pub use filter::{filter_by_cohort, payload_cohort};
pub use types::{Cohort, CohortParseError, Insight, Session};
pub use window::{format_instant, Clock, FixedClock, GenerateWindow, SystemClock, MAX_WINDOW_DAYS};
