//! Cohort filter

use super::types::{Cohort, Insight};

/// The `cohort` field of an insight payload, if it is a string
pub fn payload_cohort(insight: &Insight) -> Option<&str> {
    insight.payload.get("cohort").and_then(|value| value.as_str())
}

/// Select the insights visible under `cohort`.
///
/// `Cohort::All` returns the whole sequence; any other cohort keeps the
/// insights whose payload names exactly that cohort. Order is preserved and
/// the input is left untouched.
pub fn filter_by_cohort(insights: &[Insight], cohort: Cohort) -> Vec<Insight> {
    match cohort {
        Cohort::All => insights.to_vec(),
        selected => insights
            .iter()
            .filter(|insight| payload_cohort(insight) == Some(selected.as_str()))
            .cloned()
            .collect(),
    }
}
