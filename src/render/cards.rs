//! Insight card view model

use serde::Serialize;

use crate::insights::Insight;

pub const NO_EXPLANATION: &str = "No explanation available.";

/// Display-ready text for one insight card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightCardView {
    pub id: i64,
    pub title: String,
    /// Score with two decimals, e.g. "0.86"
    pub confidence: String,
    pub explanation: String,
    /// Payload as JSON, two-space indented
    pub payload: String,
}

impl From<&Insight> for InsightCardView {
    fn from(insight: &Insight) -> Self {
        Self {
            id: insight.id,
            title: insight.kind.clone(),
            confidence: format_confidence(insight.score),
            explanation: insight.explanation().unwrap_or(NO_EXPLANATION).to_string(),
            payload: pretty_payload(insight),
        }
    }
}

/// Two decimals, halves rounded away from zero (0.125 -> "0.13")
pub fn format_confidence(score: f64) -> String {
    if is_hundredths_tie(score) {
        let hundredths = (score.abs() * 100.0).floor() as u64 + 1;
        let sign = if score < 0.0 { "-" } else { "" };
        return format!("{}{}.{:02}", sign, hundredths / 100, hundredths % 100);
    }
    // Otherwise the nearest hundredth is unique and `{:.2}` finds it
    format!("{:.2}", score)
}

/// Exactly halfway between two hundredths
fn is_hundredths_tie(score: f64) -> bool {
    if !score.is_finite() {
        return false;
    }
    // Fixed-precision float formatting is exact, and any double that is
    // not a tie differs from one well within 40 places
    let exact = format!("{:.40}", score.abs());
    match exact.split_once('.') {
        Some((_, fraction)) => fraction[2..].trim_end_matches('0') == "5",
        None => false,
    }
}

fn pretty_payload(insight: &Insight) -> String {
    // A map of JSON values always serializes
    serde_json::to_string_pretty(&insight.payload).unwrap_or_else(|_| "{}".to_string())
}

/// Card views for a sequence of insights, order preserved
pub fn card_views(insights: &[Insight]) -> Vec<InsightCardView> {
    insights.iter().map(InsightCardView::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn insight(score: f64, explanation: Option<&str>, payload: serde_json::Value) -> Insight {
        Insight {
            id: 1,
            kind: "churn_risk".to_string(),
            score,
            payload: payload.as_object().cloned().unwrap(),
            created_at: "2024-01-01T00:00:00".to_string(),
            explanation: explanation.map(str::to_string),
        }
    }

    #[test]
    fn test_confidence_two_decimals() {
        let card = InsightCardView::from(&insight(0.8567, Some("x"), json!({})));
        assert_eq!(card.confidence, "0.86");
        assert_eq!(format_confidence(3.0), "3.00");
        assert_eq!(format_confidence(-1.234), "-1.23");
    }

    #[test]
    fn test_confidence_halves_round_away_from_zero() {
        assert_eq!(format_confidence(0.125), "0.13");
        assert_eq!(format_confidence(0.625), "0.63");
        assert_eq!(format_confidence(-0.125), "-0.13");
        assert_eq!(format_confidence(0.375), "0.38");
        assert_eq!(format_confidence(0.995), "0.99");
        assert_eq!(format_confidence(0.005), "0.01");
        assert_eq!(format_confidence(1.5), "1.50");
    }

    #[test]
    fn test_missing_explanation_placeholder() {
        let card = InsightCardView::from(&insight(0.5, None, json!({})));
        assert_eq!(card.explanation, "No explanation available.");

        let card = InsightCardView::from(&insight(0.5, Some(""), json!({})));
        assert_eq!(card.explanation, NO_EXPLANATION);

        let card = InsightCardView::from(&insight(0.5, Some("Users churn after day 3"), json!({})));
        assert_eq!(card.explanation, "Users churn after day 3");
    }

    #[test]
    fn test_payload_pretty_printed_in_server_order() {
        let payload: serde_json::Value =
            serde_json::from_str(r#"{"zeta": 1, "cohort": "cohort_0"}"#).unwrap();
        let card = InsightCardView::from(&insight(0.5, None, payload));
        assert_eq!(card.payload, "{\n  \"zeta\": 1,\n  \"cohort\": \"cohort_0\"\n}");
    }

    #[test]
    fn test_empty_payload() {
        let card = InsightCardView::from(&insight(0.5, None, json!({})));
        assert_eq!(card.payload, "{}");
    }
}
