// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Scan record and classification models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// The bin a classified item belongs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum BinCategory {
    Waste,
    Compost,
    Recycle,
}

/// Classifier output for a single image.
///
/// Validated at the classifier boundary (fields present, category one of the
/// enum, confidence finite and clamped to [0,1]); trusted downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Classification {
    /// What the model thinks the item is
    pub detected_item: String,
    /// Which bin it belongs in
    pub bin_category: BinCategory,
    /// Model confidence in [0, 1]
    pub confidence: f64,
    /// Free-text reasoning
    pub explanation: String,
    /// Ordered disposal tips
    pub disposal_tips: Vec<String>,
}

/// One recorded scan. Immutable once stored; the scans collection keeps
/// the most recent entries only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ScanRecord {
    pub id: String,
    /// Owning user's uid
    pub user_id: String,
    /// Reference to the captured image
    pub image_url: String,
    pub timestamp: DateTime<Utc>,
    pub result: Classification,
    /// Experience points this scan awarded
    pub xp_awarded: u32,
}
