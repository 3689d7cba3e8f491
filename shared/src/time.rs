//! Business-timezone time utilities
//!
//! All schedule comparisons work on minutes-since-midnight in the business
//! timezone. Conversion from an instant is always done through an explicit
//! [`Tz`] so a server in UTC and a client in any locale derive the same
//! day-of-week and minutes value for the same wall-clock moment.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::Serialize;

/// Default business timezone when none is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Kolkata;

/// Minutes in a day; `minutes_since_midnight` is always below this.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A structured view of "now" in the business timezone.
///
/// Always derived, never persisted. Recomputing for the same instant is
/// idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeData {
    /// Current time in the business timezone.
    pub now: DateTime<Tz>,
    /// Day of week in the business timezone.
    pub day_of_week: Weekday,
    /// Minutes since local midnight, 0..=1439.
    pub minutes_since_midnight: u16,
}

impl TimeData {
    /// Time data for the current instant in the given timezone.
    pub fn now_in(tz: Tz) -> Self {
        Self::at(Utc::now(), tz)
    }

    /// Time data for an arbitrary instant in the given timezone.
    ///
    /// Used by tests and backfill paths that need a deterministic clock.
    pub fn at(instant: DateTime<Utc>, tz: Tz) -> Self {
        let local = instant.with_timezone(&tz);
        Self {
            now: local,
            day_of_week: local.weekday(),
            minutes_since_midnight: (local.hour() * 60 + local.minute()) as u16,
        }
    }
}

/// Parse an `HH:MM` time-of-day string into minutes since midnight.
///
/// Returns `None` for anything malformed or out of range. Callers decide
/// what a missing value means; schedule evaluation treats it as "never
/// open" rather than failing.
pub fn parse_hhmm(value: &str) -> Option<u16> {
    let (hours, minutes) = value.split_once(':')?;
    let hours: u16 = hours.trim().parse().ok()?;
    let minutes: u16 = minutes.trim().parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Format minutes-since-midnight back into `HH:MM`.
pub fn format_hhmm(minutes: u16) -> String {
    format!("{:02}:{:02}", (minutes / 60) % 24, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_hhmm_accepts_valid_times() {
        assert_eq!(parse_hhmm("00:00"), Some(0));
        assert_eq!(parse_hhmm("10:00"), Some(600));
        assert_eq!(parse_hhmm("22:30"), Some(1350));
        assert_eq!(parse_hhmm("23:59"), Some(1439));
    }

    #[test]
    fn parse_hhmm_rejects_malformed_input() {
        assert_eq!(parse_hhmm(""), None);
        assert_eq!(parse_hhmm("10"), None);
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("10:60"), None);
        assert_eq!(parse_hhmm("ten:00"), None);
        assert_eq!(parse_hhmm("10:00:00"), None);
    }

    #[test]
    fn format_hhmm_round_trips() {
        assert_eq!(format_hhmm(600), "10:00");
        assert_eq!(format_hhmm(1439), "23:59");
        assert_eq!(parse_hhmm(&format_hhmm(815)), Some(815));
    }

    #[test]
    fn time_data_converts_to_business_timezone() {
        // 2026-08-06 16:30 UTC is 22:00 IST (+05:30) on the same Thursday.
        let instant = Utc.with_ymd_and_hms(2026, 8, 6, 16, 30, 0).unwrap();
        let data = TimeData::at(instant, DEFAULT_TIMEZONE);
        assert_eq!(data.day_of_week, Weekday::Thu);
        assert_eq!(data.minutes_since_midnight, 22 * 60);
    }

    #[test]
    fn time_data_crosses_midnight_in_business_timezone() {
        // 2026-08-06 20:00 UTC is already 01:30 IST on Friday.
        let instant = Utc.with_ymd_and_hms(2026, 8, 6, 20, 0, 0).unwrap();
        let data = TimeData::at(instant, DEFAULT_TIMEZONE);
        assert_eq!(data.day_of_week, Weekday::Fri);
        assert_eq!(data.minutes_since_midnight, 90);
    }

    #[test]
    fn time_data_is_idempotent_for_the_same_instant() {
        let instant = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        assert_eq!(
            TimeData::at(instant, DEFAULT_TIMEZONE),
            TimeData::at(instant, DEFAULT_TIMEZONE)
        );
    }
}
