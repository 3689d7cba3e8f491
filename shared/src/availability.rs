//! Restaurant open/closed decision logic
//!
//! Combines three layers of state, strongest first:
//!
//! 1. the system-wide [`GlobalOverride`] (admin kill switch / force open),
//! 2. the per-restaurant [`ManualOverride`] (`is_open` tri-state),
//! 3. the daily `opens_at`/`closes_at` window.
//!
//! Evaluation is a total function: malformed schedule strings evaluate to
//! closed with [`ClosedReason::OutsideHours`] instead of failing.

use serde::{Deserialize, Serialize};

use crate::time::{TimeData, parse_hhmm};

/// System-wide availability override, part of the system config singleton.
///
/// `Open`/`Closed` force that state for every restaurant regardless of
/// per-restaurant state; `Auto` defers to per-restaurant logic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlobalOverride {
    Open,
    Closed,
    #[default]
    Auto,
}

/// Per-restaurant manual override.
///
/// Modeled as a tagged enum rather than `Option<bool>` so "unset means
/// follow the schedule" is explicit at every use site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualOverride {
    ForcedOpen,
    ForcedClosed,
    Auto,
}

impl From<Option<bool>> for ManualOverride {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::ForcedOpen,
            Some(false) => Self::ForcedClosed,
            None => Self::Auto,
        }
    }
}

/// Why a restaurant is closed right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClosedReason {
    /// Admin forced this restaurant closed.
    ManualClosed,
    /// The system-wide override is `closed`.
    GlobalClosed,
    /// The current time falls outside the opening window.
    OutsideHours,
}

/// Evaluation result for one restaurant at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ClosedReason>,
    /// Minutes-since-midnight of the next `opens_at` occurrence (today if
    /// not yet reached, else tomorrow; the value is the same either way).
    /// Only set when closed outside hours with a well-formed schedule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_open_minutes: Option<u16>,
}

impl Availability {
    pub fn open() -> Self {
        Self {
            open: true,
            reason: None,
            next_open_minutes: None,
        }
    }

    pub fn closed(reason: ClosedReason, next_open_minutes: Option<u16>) -> Self {
        Self {
            open: false,
            reason: Some(reason),
            next_open_minutes,
        }
    }
}

/// Decide open/closed for one restaurant.
///
/// First match wins: global override, then manual override, then the
/// schedule window. `opens_at == closes_at` denotes a zero-width closed
/// window and is defined as always open.
pub fn evaluate(
    opens_at: &str,
    closes_at: &str,
    manual: ManualOverride,
    global: GlobalOverride,
    time: &TimeData,
) -> Availability {
    match global {
        GlobalOverride::Closed => Availability::closed(ClosedReason::GlobalClosed, None),
        GlobalOverride::Open => Availability::open(),
        GlobalOverride::Auto => match manual {
            ManualOverride::ForcedClosed => Availability::closed(ClosedReason::ManualClosed, None),
            ManualOverride::ForcedOpen => Availability::open(),
            ManualOverride::Auto => {
                evaluate_schedule(opens_at, closes_at, time.minutes_since_midnight)
            }
        },
    }
}

/// Compare the current minutes against the `[opens_at, closes_at)` window.
///
/// A close time earlier than the open time wraps past midnight. Malformed
/// time strings read as closed outside hours with no next-open hint.
fn evaluate_schedule(opens_at: &str, closes_at: &str, minutes: u16) -> Availability {
    let (Some(opens), Some(closes)) = (parse_hhmm(opens_at), parse_hhmm(closes_at)) else {
        return Availability::closed(ClosedReason::OutsideHours, None);
    };

    if opens == closes {
        return Availability::open();
    }

    let in_window = if closes > opens {
        minutes >= opens && minutes < closes
    } else {
        // Overnight window, e.g. 18:00-02:00
        minutes >= opens || minutes < closes
    };

    if in_window {
        Availability::open()
    } else {
        Availability::closed(ClosedReason::OutsideHours, Some(opens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use chrono_tz::Tz;

    const TZ: Tz = chrono_tz::Asia::Kolkata;

    /// IST time-of-day helper: fabricate a TimeData at the given local time.
    fn at_ist(hour: u32, minute: u32) -> TimeData {
        let local = TZ.with_ymd_and_hms(2026, 8, 6, hour, minute, 0).unwrap();
        TimeData::at(local.with_timezone(&Utc), TZ)
    }

    fn eval_auto(opens: &str, closes: &str, time: &TimeData) -> Availability {
        evaluate(opens, closes, ManualOverride::Auto, GlobalOverride::Auto, time)
    }

    #[test]
    fn daytime_window_is_half_open() {
        let open = eval_auto("10:00", "22:00", &at_ist(10, 0));
        assert!(open.open);

        let before = eval_auto("10:00", "22:00", &at_ist(9, 59));
        assert!(!before.open);
        assert_eq!(before.reason, Some(ClosedReason::OutsideHours));

        // 21:59 is the last open minute, 22:00 is closed.
        assert!(eval_auto("10:00", "22:00", &at_ist(21, 59)).open);
        let at_close = eval_auto("10:00", "22:00", &at_ist(22, 0));
        assert!(!at_close.open);
        assert_eq!(at_close.reason, Some(ClosedReason::OutsideHours));
        assert_eq!(at_close.next_open_minutes, Some(600));
    }

    #[test]
    fn overnight_window_wraps_past_midnight() {
        // 18:00-02:00: open late evening and the small hours, closed midday.
        assert!(eval_auto("18:00", "02:00", &at_ist(23, 30)).open);
        assert!(eval_auto("18:00", "02:00", &at_ist(1, 59)).open);
        assert!(!eval_auto("18:00", "02:00", &at_ist(2, 0)).open);
        let midday = eval_auto("18:00", "02:00", &at_ist(12, 0));
        assert!(!midday.open);
        assert_eq!(midday.next_open_minutes, Some(18 * 60));
    }

    #[test]
    fn equal_open_and_close_means_always_open() {
        assert!(eval_auto("00:00", "00:00", &at_ist(3, 0)).open);
        assert!(eval_auto("10:00", "10:00", &at_ist(10, 0)).open);
    }

    #[test]
    fn malformed_schedule_reads_as_closed() {
        let verdict = eval_auto("soon", "22:00", &at_ist(12, 0));
        assert!(!verdict.open);
        assert_eq!(verdict.reason, Some(ClosedReason::OutsideHours));
        assert_eq!(verdict.next_open_minutes, None);
    }

    #[test]
    fn manual_override_beats_schedule() {
        // Forced closed mid-window.
        let closed = evaluate(
            "10:00",
            "22:00",
            ManualOverride::ForcedClosed,
            GlobalOverride::Auto,
            &at_ist(12, 0),
        );
        assert!(!closed.open);
        assert_eq!(closed.reason, Some(ClosedReason::ManualClosed));

        // Forced open outside the window.
        let open = evaluate(
            "10:00",
            "22:00",
            ManualOverride::ForcedOpen,
            GlobalOverride::Auto,
            &at_ist(3, 0),
        );
        assert!(open.open);
    }

    #[test]
    fn global_override_beats_everything() {
        let forced_closed = evaluate(
            "10:00",
            "22:00",
            ManualOverride::ForcedOpen,
            GlobalOverride::Closed,
            &at_ist(12, 0),
        );
        assert!(!forced_closed.open);
        assert_eq!(forced_closed.reason, Some(ClosedReason::GlobalClosed));

        let forced_open = evaluate(
            "10:00",
            "22:00",
            ManualOverride::ForcedClosed,
            GlobalOverride::Open,
            &at_ist(3, 0),
        );
        assert!(forced_open.open);
    }

    #[test]
    fn next_open_is_the_open_time_today_or_tomorrow() {
        // Before opening: next occurrence is later today.
        let early = eval_auto("10:00", "22:00", &at_ist(8, 0));
        assert_eq!(early.next_open_minutes, Some(600));

        // After closing: next occurrence is tomorrow, same minutes value.
        let late = eval_auto("10:00", "22:00", &at_ist(23, 0));
        assert_eq!(late.next_open_minutes, Some(600));
    }

    #[test]
    fn manual_override_maps_from_tri_state_field() {
        assert_eq!(ManualOverride::from(Some(true)), ManualOverride::ForcedOpen);
        assert_eq!(
            ManualOverride::from(Some(false)),
            ManualOverride::ForcedClosed
        );
        assert_eq!(ManualOverride::from(None), ManualOverride::Auto);
    }
}
