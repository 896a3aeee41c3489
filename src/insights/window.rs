//! Generation window
//!
//! The backend generates insights for an explicit interval. The dashboard
//! always asks for a trailing window that ends at the moment of the call.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// Source of "now"
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Body of `POST /api/insights/generate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerateWindow {
    #[serde(serialize_with = "serialize_instant")]
    pub start_time: DateTime<Utc>,
    #[serde(serialize_with = "serialize_instant")]
    pub end_time: DateTime<Utc>,
}

/// Longest trailing window the dashboard will request
pub const MAX_WINDOW_DAYS: i64 = 365;

impl GenerateWindow {
    /// Window of `days` days ending at `now`, start inclusive.
    ///
    /// Both bounds derive from the single `now` passed in. `None` unless
    /// `days` is in `1..=MAX_WINDOW_DAYS` and the start is representable.
    pub fn trailing(now: DateTime<Utc>, days: i64) -> Option<Self> {
        if !(1..=MAX_WINDOW_DAYS).contains(&days) {
            return None;
        }
        let start_time = now.checked_sub_signed(Duration::try_days(days)?)?;
        Some(Self {
            start_time,
            end_time: now,
        })
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }
}

/// Formats like a browser's `Date.toISOString()`: `2024-03-08T09:30:00.000Z`
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_instant<S: Serializer>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_instant(instant))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_trailing_window_from_fixed_now() {
        let now = Utc.with_ymd_and_hms(2024, 3, 8, 9, 30, 0).unwrap();
        let window = GenerateWindow::trailing(FixedClock(now).now(), 7).unwrap();

        assert_eq!(window.end_time, now);
        assert_eq!(window.duration(), Duration::days(7));

        let body = serde_json::to_value(window).unwrap();
        assert_eq!(body["start_time"], "2024-03-01T09:30:00.000Z");
        assert_eq!(body["end_time"], "2024-03-08T09:30:00.000Z");
    }

    #[test]
    fn test_millisecond_precision_is_kept() {
        let now = Utc.timestamp_millis_opt(1_709_890_200_123).unwrap();
        assert_eq!(format_instant(&now), "2024-03-08T09:30:00.123Z");
    }

    #[test]
    fn test_window_crosses_month_boundary() {
        let now = Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap();
        let window = GenerateWindow::trailing(now, 7).unwrap();
        assert_eq!(format_instant(&window.start_time), "2024-02-25T00:00:00.000Z");
    }

    #[test]
    fn test_out_of_range_days_give_no_window() {
        let now = Utc.with_ymd_and_hms(2024, 3, 8, 9, 30, 0).unwrap();

        assert!(GenerateWindow::trailing(now, 0).is_none());
        assert!(GenerateWindow::trailing(now, -7).is_none());
        assert!(GenerateWindow::trailing(now, MAX_WINDOW_DAYS + 1).is_none());
        assert!(GenerateWindow::trailing(now, i64::MAX / 1000).is_none());
        assert!(GenerateWindow::trailing(now, MAX_WINDOW_DAYS).is_some());
    }

    #[test]
    fn test_unrepresentable_start_gives_no_window() {
        assert!(GenerateWindow::trailing(DateTime::<Utc>::MIN_UTC, 1).is_none());
    }
}
