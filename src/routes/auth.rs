// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity and session routes.

use axum::{extract::State, routing::get, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::models::UserProfile;
use crate::services::IdentityService;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/session", get(session))
}

#[derive(Deserialize, Validate)]
pub struct IdentityRequest {
    #[validate(length(min = 1, max = 32))]
    username: String,
}

/// Response for logout.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Current session response; `user` is null when unauthenticated.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionResponse {
    pub user: Option<UserProfile>,
}

/// Create a new identity and start a session for it.
async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<IdentityRequest>,
) -> Result<Json<UserProfile>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = IdentityService::new(state.db.clone())
        .signup(&payload.username)
        .await?;
    Ok(Json(user))
}

/// Start a session for an existing identity.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<IdentityRequest>,
) -> Result<Json<UserProfile>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = IdentityService::new(state.db.clone())
        .login(&payload.username)
        .await?;
    Ok(Json(user))
}

/// End the session. Succeeds whether or not one was active.
async fn logout(State(state): State<Arc<AppState>>) -> Result<Json<LogoutResponse>> {
    IdentityService::new(state.db.clone()).logout().await?;
    Ok(Json(LogoutResponse { success: true }))
}

/// The profile bound to the active session, or null.
async fn session(State(state): State<Arc<AppState>>) -> Result<Json<SessionResponse>> {
    let user = IdentityService::new(state.db.clone()).current_user().await?;
    Ok(Json(SessionResponse { user }))
}
