// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile model and the pure progression rules applied per scan.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::{utc_date, utc_date_yesterday};

/// Points required per level.
pub const POINTS_PER_LEVEL: u32 = 100;

/// Level derived from cumulative points.
///
/// Level 1 covers 0..100 points, level 2 covers 100..200, and so on.
pub fn level_for_points(points: u32) -> u32 {
    points / POINTS_PER_LEVEL + 1
}

/// An achievement slot on a user profile.
///
/// Instantiated locked (no `unlocked_at`) from the static catalog at signup.
/// Unlocking sets the timestamp once; it is never cleared afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Achievement {
    pub fn is_unlocked(&self) -> bool {
        self.unlocked_at.is_some()
    }
}

/// User profile stored in the users collection, keyed by username.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    /// Opaque unique id (distinct from the username key)
    pub uid: String,
    /// Unique login name, immutable after signup
    pub username: String,
    /// Display name shown in the UI
    pub display_name: String,
    /// Avatar image URL
    pub avatar_url: String,
    /// Cumulative experience points, never decreases
    pub points: u32,
    /// Total scans recorded, never decreases
    pub scans_count: u32,
    /// Derived from points; see [`level_for_points`]
    pub level: u32,
    /// Leaderboard position, only meaningful on projected copies
    #[serde(default)]
    pub rank: u32,
    /// Consecutive UTC calendar days with at least one scan
    pub streak: u32,
    /// Last UTC date a scan was recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_scan_date: Option<NaiveDate>,
    /// Achievement slots in catalog order
    pub achievements: Vec<Achievement>,
}

impl UserProfile {
    /// Create a fresh profile with zeroed counters and a locked catalog copy.
    pub fn new(uid: String, username: &str, achievements: Vec<Achievement>) -> Self {
        Self {
            uid,
            username: username.to_string(),
            display_name: username.to_string(),
            avatar_url: format!(
                "https://api.dicebear.com/7.x/pixel-art/svg?seed={}",
                username
            ),
            points: 0,
            scans_count: 0,
            level: 1,
            rank: 0,
            streak: 0,
            last_scan_date: None,
            achievements,
        }
    }

    /// Apply one scan's worth of progression: points, scan count, level,
    /// and the streak rules.
    ///
    /// Streak rules, on UTC calendar dates:
    /// - second scan on the same day leaves the streak untouched
    /// - a scan the day after the previous one extends it by 1
    /// - anything else (first scan ever, or a gap of 2+ days) resets it to 1
    pub fn apply_scan(&mut self, xp_awarded: u32, now: DateTime<Utc>) {
        self.points += xp_awarded;
        self.scans_count += 1;
        self.level = level_for_points(self.points);

        let today = utc_date(now);
        if self.last_scan_date != Some(today) {
            self.streak = if self.last_scan_date == Some(utc_date_yesterday(now)) {
                self.streak + 1
            } else {
                1
            };
            self.last_scan_date = Some(today);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn profile() -> UserProfile {
        UserProfile::new("u_test".to_string(), "alice", vec![])
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(level_for_points(0), 1);
        assert_eq!(level_for_points(99), 1);
        assert_eq!(level_for_points(100), 2);
        assert_eq!(level_for_points(250), 3);
    }

    #[test]
    fn test_first_scan_starts_streak() {
        let mut user = profile();
        user.apply_scan(14, at(2026, 3, 10, 9));

        assert_eq!(user.points, 14);
        assert_eq!(user.scans_count, 1);
        assert_eq!(user.level, 1);
        assert_eq!(user.streak, 1);
        assert_eq!(
            user.last_scan_date,
            Some(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap())
        );
    }

    #[test]
    fn test_same_day_scan_keeps_streak() {
        let mut user = profile();
        user.apply_scan(14, at(2026, 3, 10, 9));
        user.apply_scan(15, at(2026, 3, 10, 21));

        assert_eq!(user.points, 29);
        assert_eq!(user.scans_count, 2);
        assert_eq!(user.streak, 1);
        assert_eq!(
            user.last_scan_date,
            Some(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap())
        );
    }

    #[test]
    fn test_next_day_scan_extends_streak() {
        let mut user = profile();
        user.apply_scan(10, at(2026, 3, 10, 9));
        user.apply_scan(10, at(2026, 3, 11, 7));
        user.apply_scan(10, at(2026, 3, 12, 23));

        assert_eq!(user.streak, 3);
        assert_eq!(
            user.last_scan_date,
            Some(NaiveDate::from_ymd_opt(2026, 3, 12).unwrap())
        );
    }

    #[test]
    fn test_gap_resets_streak() {
        let mut user = profile();
        user.apply_scan(10, at(2026, 3, 10, 9));
        user.apply_scan(10, at(2026, 3, 11, 9));
        assert_eq!(user.streak, 2);

        user.apply_scan(10, at(2026, 3, 14, 9));
        assert_eq!(user.streak, 1);
    }

    #[test]
    fn test_level_recomputed_from_new_points() {
        let mut user = profile();
        for day in 1..=7 {
            user.apply_scan(15, at(2026, 3, day, 12));
        }
        assert_eq!(user.points, 105);
        assert_eq!(user.level, 2);
    }

    #[test]
    fn test_counters_never_decrease() {
        let mut user = profile();
        let mut last_points = 0;
        let mut last_scans = 0;
        for day in 1..=10 {
            user.apply_scan(10, at(2026, 3, day, 12));
            assert!(user.points >= last_points);
            assert!(user.scans_count > last_scans);
            last_points = user.points;
            last_scans = user.scans_count;
        }
    }
}
