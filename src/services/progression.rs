// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Scan-to-progression pipeline.
//!
//! Handles the core workflow:
//! 1. Resolve the session to the acting user
//! 2. Award experience from the classification confidence
//! 3. Apply counter, level, and streak updates
//! 4. Evaluate achievement unlocks on the post-update profile
//! 5. Persist the profile and the new scan record together

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::SortifyDb;
use crate::error::{AppError, Result};
use crate::models::{Classification, ScanRecord, UserProfile};
use crate::services::achievements;

/// Flat experience award per scan.
pub const BASE_XP: u32 = 10;
/// Bonus experience scale applied to the classification confidence.
pub const CONFIDENCE_MULTIPLIER: f64 = 5.0;

/// Experience awarded for a scan at the given confidence.
///
/// Precondition: `confidence` is finite and in [0, 1]. The classifier
/// boundary enforces this; the award is not re-validated here.
pub fn xp_for_confidence(confidence: f64) -> u32 {
    BASE_XP + (confidence * CONFIDENCE_MULTIPLIER).floor() as u32
}

/// Turns one classification event into durable profile and scan state.
#[derive(Clone)]
pub struct ScanProcessor {
    db: SortifyDb,
}

impl ScanProcessor {
    pub fn new(db: SortifyDb) -> Self {
        Self { db }
    }

    /// Record a scan for the acting user.
    ///
    /// The session must resolve to an existing profile whose uid matches
    /// `user_id`; otherwise `SessionExpired`. On success both the updated
    /// profile and the new scan record have been persisted; no
    /// partial-success state is observable from a successful return.
    pub async fn record_scan(
        &self,
        user_id: &str,
        image_url: &str,
        classification: Classification,
        now: DateTime<Utc>,
    ) -> Result<(ScanRecord, UserProfile)> {
        let mut user = self.acting_user(user_id).await?;

        let xp_awarded = xp_for_confidence(classification.confidence);
        user.apply_scan(xp_awarded, now);

        let unlocked = achievements::evaluate(&mut user, now);

        let scan = ScanRecord {
            id: format!("s_{}", Uuid::new_v4().simple()),
            user_id: user.uid.clone(),
            image_url: image_url.to_string(),
            timestamp: now,
            result: classification,
            xp_awarded,
        };

        self.db.record_scan_txn(&user, &scan).await?;

        tracing::info!(
            username = %user.username,
            scan_id = %scan.id,
            xp_awarded,
            points = user.points,
            streak = user.streak,
            unlocked = ?unlocked,
            "Scan recorded"
        );

        Ok((scan, user))
    }

    /// Resolve the session to the profile it is bound to, requiring it to
    /// match the claimed user id.
    async fn acting_user(&self, user_id: &str) -> Result<UserProfile> {
        let username = self.db.session().await?.ok_or(AppError::SessionExpired)?;
        let user = self
            .db
            .get_user(&username)
            .await?
            .ok_or(AppError::SessionExpired)?;

        if user.uid != user_id {
            return Err(AppError::SessionExpired);
        }
        Ok(user)
    }
}
