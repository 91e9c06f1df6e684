// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Achievement catalog and unlock evaluation.
//!
//! The catalog is static; each user gets a locked copy at signup. The
//! evaluator runs against the post-update profile after every scan and is
//! idempotent: an already-unlocked achievement is never touched again, and
//! unlocks are never revoked (a streak_3 badge survives a later streak
//! reset).

use chrono::{DateTime, Utc};

use crate::models::{Achievement, UserProfile};

pub const FIRST_SCAN: &str = "first_scan";
pub const STREAK_3: &str = "streak_3";
pub const RECYCLE_PRO: &str = "recycle_pro";

/// The static achievement catalog, in display order.
pub fn catalog() -> Vec<Achievement> {
    let entry = |id: &str, title: &str, icon: &str, description: &str| Achievement {
        id: id.to_string(),
        title: title.to_string(),
        icon: icon.to_string(),
        description: description.to_string(),
        unlocked_at: None,
    };

    vec![
        entry(FIRST_SCAN, "Recruit", "🌱", "Complete your first scan."),
        entry(STREAK_3, "Consistent", "🔥", "Maintain a 3-day sorting streak."),
        entry(
            RECYCLE_PRO,
            "Plastic Punisher",
            "♻️",
            "Sort 10 recyclable items.",
        ),
    ]
}

/// Evaluate unlock predicates against a post-update profile, stamping any
/// newly-satisfied achievement with `now`. Returns the ids unlocked by this
/// call.
pub fn evaluate(user: &mut UserProfile, now: DateTime<Utc>) -> Vec<String> {
    let mut unlocked = Vec::new();

    for achievement in &mut user.achievements {
        if achievement.is_unlocked() {
            continue;
        }

        let satisfied = match achievement.id.as_str() {
            FIRST_SCAN => user.scans_count == 1,
            STREAK_3 => user.streak >= 3,
            // recycle_pro ships in the catalog but has no predicate yet
            _ => false,
        };

        if satisfied {
            achievement.unlocked_at = Some(now);
            unlocked.push(achievement.id.clone());
        }
    }

    unlocked
}
