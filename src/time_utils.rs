// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time handling.
//!
//! Streak arithmetic works on UTC calendar dates: a "day" is the date
//! component of a UTC timestamp, and "yesterday" is the calendar date of
//! the instant exactly 24 hours earlier. Users in other timezones get UTC
//! day boundaries.

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// The UTC calendar date of a timestamp.
pub fn utc_date(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
}

/// The UTC calendar date exactly 24 hours before a timestamp.
pub fn utc_date_yesterday(now: DateTime<Utc>) -> NaiveDate {
    (now - Duration::hours(24)).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_utc_date_ignores_time_of_day() {
        let early = Utc.with_ymd_and_hms(2026, 3, 14, 0, 0, 1).unwrap();
        let late = Utc.with_ymd_and_hms(2026, 3, 14, 23, 59, 59).unwrap();
        assert_eq!(utc_date(early), utc_date(late));
    }

    #[test]
    fn test_yesterday_crosses_month_boundary() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        assert_eq!(
            utc_date_yesterday(now),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
        );
    }
}
