// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting and the calendar clock.

use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Source of "now" and "today" for cache bucketing and pruning.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar day of `now()`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock (UTC).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for simulating day rollover.
#[derive(Debug)]
pub struct FixedClock {
    seconds: AtomicI64,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            seconds: AtomicI64::new(now.timestamp()),
        }
    }

    /// Clock pinned to noon UTC on `day`.
    pub fn at_day(day: NaiveDate) -> Self {
        let noon = day.and_hms_opt(12, 0, 0).unwrap_or_default().and_utc();
        Self::new(noon)
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.seconds.store(now.timestamp(), Ordering::SeqCst);
    }

    pub fn advance_days(&self, days: i64) {
        self.seconds
            .fetch_add(Duration::days(days).num_seconds(), Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.seconds.load(Ordering::SeqCst), 0).unwrap_or_default()
    }
}

/// Clamp `end` so the range spans at most `max_days` days after `start`.
///
/// Returns the (possibly shortened) end and whether capping happened.
pub fn cap_range(start: NaiveDate, end: NaiveDate, max_days: i64) -> (NaiveDate, bool) {
    let limit = start + Duration::days(max_days);
    if end > limit {
        (limit, true)
    } else {
        (end, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fixed_clock_advances_across_days() {
        let clock = FixedClock::at_day(day(2025, 1, 31));
        assert_eq!(clock.today(), day(2025, 1, 31));

        clock.advance_days(1);
        assert_eq!(clock.today(), day(2025, 2, 1));

        clock.advance_days(-2);
        assert_eq!(clock.today(), day(2025, 1, 30));
    }

    #[test]
    fn test_format_utc_rfc3339_uses_z_suffix() {
        let clock = FixedClock::at_day(day(2025, 3, 4));
        assert_eq!(format_utc_rfc3339(clock.now()), "2025-03-04T12:00:00Z");
    }

    #[test]
    fn test_cap_range() {
        let start = day(2024, 1, 1);
        assert_eq!(
            cap_range(start, day(2024, 6, 1), 365),
            (day(2024, 6, 1), false)
        );
        // 2024 is a leap year: 365 days after Jan 1 is Dec 31
        assert_eq!(
            cap_range(start, day(2025, 6, 1), 365),
            (day(2024, 12, 31), true)
        );
    }
}
