//! Presentation
//!
//! View models shared by every front end (insight cards, funnel stages) and
//! the plain-text rendering used by the command line.

mod cards;
mod dashboard;
mod funnel;

pub use cards::{card_views, format_confidence, InsightCardView, NO_EXPLANATION};
pub use dashboard::{render_text, TextDashboard, TAGLINE, TITLE};
pub use funnel::{render_funnel, share_of_top, FunnelStage, FUNNEL_STAGES};
