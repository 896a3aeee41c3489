//! Terminal rendering of the whole dashboard

use std::fmt;

use super::cards::card_views;
use super::funnel::render_funnel;
use crate::store::DashboardState;

pub const TITLE: &str = "Signal > Noise";
pub const TAGLINE: &str = "Behavioral intelligence for product teams.";

const FUNNEL_BAR_WIDTH: usize = 30;

/// Text view of a dashboard state
pub struct TextDashboard<'a>(pub &'a DashboardState);

impl fmt::Display for TextDashboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;

        writeln!(f, "{}\n{}\n", TITLE, TAGLINE)?;

        writeln!(f, "Cohort: {}", state.cohort().label())?;
        if !state.status().is_empty() {
            writeln!(f, "Status: {}", state.status())?;
        }

        writeln!(f, "\nFunnel\n------")?;
        writeln!(f, "{}\n", render_funnel(FUNNEL_BAR_WIDTH))?;

        let visible = state.visible_insights();
        writeln!(f, "Insights ({})\n--------", visible.len())?;
        if visible.is_empty() {
            writeln!(f, "No insights to show.")?;
        }

        for card in card_views(&visible) {
            writeln!(f, "\n[{}] {}  Confidence {}", card.id, card.title, card.confidence)?;
            writeln!(f, "{}", card.explanation)?;
            for line in card.payload.lines() {
                writeln!(f, "    {}", line)?;
            }
        }

        Ok(())
    }
}

/// Render header, status, funnel and the filtered insight cards as text
pub fn render_text(state: &DashboardState) -> String {
    TextDashboard(state).to_string()
}
