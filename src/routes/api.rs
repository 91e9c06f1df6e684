// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for the authenticated user.

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::session::SessionUser;
use crate::models::{Classification, ScanRecord, UserProfile};
use crate::services::{leaderboard, ScanProcessor};
use crate::AppState;

/// API routes (require an active session).
/// The session middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/classify", post(classify))
        .route("/api/scans", post(record_scan).get(get_scans))
        .route("/api/leaderboard", get(get_leaderboard))
}

// ─── Classification ──────────────────────────────────────────

#[derive(Deserialize)]
struct ClassifyRequest {
    /// Base64-encoded JPEG, optionally with a data-URL prefix
    image: String,
}

/// Classify a captured image via Gemini.
///
/// No state mutation happens here: the UI submits the result separately
/// to `POST /api/scans` to record it.
async fn classify(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<SessionUser>,
    Json(payload): Json<ClassifyRequest>,
) -> Result<Json<Classification>> {
    if payload.image.is_empty() {
        return Err(AppError::BadRequest("Image payload is empty".to_string()));
    }

    tracing::debug!(username = %user.username, "Classifying image");

    let classification = state.classifier.classify(&payload.image).await?;
    Ok(Json(classification))
}

// ─── Scans & Progression ─────────────────────────────────────

#[derive(Deserialize)]
struct RecordScanRequest {
    image_url: String,
    result: Classification,
}

/// Scan recording response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ScanResponse {
    pub scan: ScanRecord,
    pub user: UserProfile,
}

/// Record a scan for the acting user and apply progression.
async fn record_scan(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<SessionUser>,
    Json(payload): Json<RecordScanRequest>,
) -> Result<Json<ScanResponse>> {
    let (scan, user) = ScanProcessor::new(state.db.clone())
        .record_scan(
            &user.uid,
            &payload.image_url,
            payload.result,
            chrono::Utc::now(),
        )
        .await?;

    Ok(Json(ScanResponse { scan, user }))
}

/// Scan history response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ScansResponse {
    /// Retained scans for the acting user, newest first
    pub scans: Vec<ScanRecord>,
}

/// Get the acting user's retained scans, newest first.
async fn get_scans(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<SessionUser>,
) -> Result<Json<ScansResponse>> {
    let scans = state.db.scans_for_user(&user.uid).await?;
    Ok(Json(ScansResponse { scans }))
}

// ─── Leaderboard ─────────────────────────────────────────────

/// Leaderboard response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LeaderboardResponse {
    /// All users ranked by points descending
    pub users: Vec<UserProfile>,
}

/// Project the leaderboard over all stored users.
async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LeaderboardResponse>> {
    let users = leaderboard::project(&state.db).await?;
    Ok(Json(LeaderboardResponse { users }))
}
