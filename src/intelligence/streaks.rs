// ABOUTME: Consecutive-day check-in streak computation over UTC calendar days
// ABOUTME: Duplicate same-day check-ins collapse before the streak walk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! Check-in streaks.
//!
//! A streak counts consecutive UTC calendar days with at least one
//! check-in, ending today. A user who has not checked in today has a
//! streak of zero regardless of history.

use chrono::{DateTime, NaiveDate, Utc};

/// Computes the current streak from check-in timestamps, in any order.
///
/// Timestamps are collapsed to UTC calendar days first, so several
/// check-ins on the same day count once. Day `i` of the walk must be
/// exactly `i` days before today or the streak ends.
#[must_use]
pub fn streak_as_of(checkin_times: &[DateTime<Utc>], now: DateTime<Utc>) -> u32 {
    let mut days: Vec<NaiveDate> = checkin_times.iter().map(DateTime::date_naive).collect();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let today = now.date_naive();
    let mut streak = 0;
    for (index, day) in days.iter().enumerate() {
        let days_back = (today - *day).num_days();
        if usize::try_from(days_back) == Ok(index) {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// [`streak_as_of`] evaluated against the current wall clock.
#[must_use]
pub fn current_streak(checkin_times: &[DateTime<Utc>]) -> u32 {
    streak_as_of(checkin_times, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn noon_utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn three_consecutive_days_make_a_streak_of_three() {
        let now = noon_utc(2025, 3, 10);
        let times = vec![now, now - Duration::days(1), now - Duration::days(2)];

        assert_eq!(streak_as_of(&times, now), 3);
    }

    #[test]
    fn a_gap_ends_the_streak() {
        let now = noon_utc(2025, 3, 10);
        let times = vec![now, now - Duration::days(2), now - Duration::days(3)];

        assert_eq!(streak_as_of(&times, now), 1);
    }

    #[test]
    fn no_checkins_means_zero() {
        let now = noon_utc(2025, 3, 10);

        assert_eq!(streak_as_of(&[], now), 0);
    }

    #[test]
    fn missing_today_means_zero_even_with_history() {
        let now = noon_utc(2025, 3, 10);
        let times = vec![now - Duration::days(1), now - Duration::days(2)];

        assert_eq!(streak_as_of(&times, now), 0);
    }

    #[test]
    fn unsorted_input_is_handled() {
        let now = noon_utc(2025, 3, 10);
        let times = vec![now - Duration::days(2), now, now - Duration::days(1)];

        assert_eq!(streak_as_of(&times, now), 3);
    }

    #[test]
    fn same_day_duplicates_count_once() {
        let now = noon_utc(2025, 3, 10);
        let times = vec![
            now,
            now - Duration::hours(3),
            now - Duration::days(1),
            now - Duration::days(1) + Duration::hours(2),
        ];

        assert_eq!(streak_as_of(&times, now), 2);
    }

    #[test]
    fn days_are_utc_calendar_days_not_24h_windows() {
        // 23:30 yesterday and 00:30 today are one hour apart but two
        // distinct calendar days.
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 0, 30, 0).unwrap();
        let times = vec![now, Utc.with_ymd_and_hms(2025, 3, 9, 23, 30, 0).unwrap()];

        assert_eq!(streak_as_of(&times, now), 2);
    }

    #[test]
    fn future_dated_checkin_breaks_the_walk() {
        let now = noon_utc(2025, 3, 10);
        let times = vec![now + Duration::days(1), now];

        assert_eq!(streak_as_of(&times, now), 0);
    }
}
