//! UI Components
//!
//! Leptos components for the dashboard panels.

pub mod cohort_selector;
pub mod funnel_chart;
pub mod insight_cards;

pub use cohort_selector::CohortSelector;
pub use funnel_chart::FunnelChart;
pub use insight_cards::InsightCards;
