//! Insight and cohort types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A server-computed behavioral-analytics record.
///
/// Insights are snapshots: the dashboard never edits them, it only replaces
/// the whole list after a fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: i64,
    /// Category label (`type` on the wire)
    #[serde(rename = "type")]
    pub kind: String,
    /// Confidence score; the backend does not bound it
    pub score: f64,
    #[serde(default)]
    pub payload: serde_json::Map<String, serde_json::Value>,
    /// Creation timestamp exactly as the server sent it
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Insight {
    /// Explanation text, treating an empty string as absent
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref().filter(|text| !text.is_empty())
    }
}

/// Opaque bearer token issued by the login endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct Session(String);

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Session(<redacted>)")
    }
}

/// User segment used to filter insights client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cohort {
    #[default]
    All,
    #[serde(rename = "cohort_0")]
    Cohort0,
    #[serde(rename = "cohort_1")]
    Cohort1,
    #[serde(rename = "cohort_2")]
    Cohort2,
}

impl Cohort {
    /// Every selectable cohort, in display order
    pub const ALL: [Cohort; 4] = [Cohort::All, Cohort::Cohort0, Cohort::Cohort1, Cohort::Cohort2];

    /// Wire value, as stored in an insight payload's `cohort` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Cohort::All => "all",
            Cohort::Cohort0 => "cohort_0",
            Cohort::Cohort1 => "cohort_1",
            Cohort::Cohort2 => "cohort_2",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Cohort::All => "All Cohorts",
            Cohort::Cohort0 => "Cohort 0",
            Cohort::Cohort1 => "Cohort 1",
            Cohort::Cohort2 => "Cohort 2",
        }
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown cohort '{0}' (expected one of: all, cohort_0, cohort_1, cohort_2)")]
pub struct CohortParseError(pub String);

impl FromStr for Cohort {
    type Err = CohortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cohort::ALL
            .into_iter()
            .find(|cohort| cohort.as_str() == s)
            .ok_or_else(|| CohortParseError(s.to_string()))
    }
}
