// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session-resolution middleware.
//!
//! Resolves the store's session pointer to a stored profile and attaches
//! it to the request. There is no token: the store itself is the session
//! authority (single active identity, as the client works).

use crate::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Acting user extracted from the session.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub uid: String,
    pub username: String,
}

/// Middleware that requires an active session bound to an existing user.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let username = state
        .db
        .session()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // A session naming a user the store no longer has (fail-open recovery
    // after corruption) reads as unauthenticated.
    let user = state
        .db
        .get_user(&username)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(SessionUser {
        uid: user.uid,
        username: user.username,
    });

    Ok(next.run(request).await)
}
