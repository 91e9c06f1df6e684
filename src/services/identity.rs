// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity and session management.
//!
//! No password or credential is modeled: knowing a username is logging in.
//! The session is the store's single optional username; at most one
//! identity is active at a time per store.

use uuid::Uuid;

use crate::db::SortifyDb;
use crate::error::{AppError, Result};
use crate::models::UserProfile;
use crate::services::achievements;

/// Creates and authenticates identities against the store.
#[derive(Clone)]
pub struct IdentityService {
    db: SortifyDb,
}

impl IdentityService {
    pub fn new(db: SortifyDb) -> Self {
        Self { db }
    }

    /// Create a new identity and bind the session to it.
    ///
    /// Fails with `DuplicateIdentity` on a case-sensitive username
    /// collision. The new profile starts with zeroed counters and a locked
    /// copy of the full achievement catalog.
    pub async fn signup(&self, username: &str) -> Result<UserProfile> {
        validate_username(username)?;

        if self.db.get_user(username).await?.is_some() {
            return Err(AppError::DuplicateIdentity(username.to_string()));
        }

        let uid = format!("u_{}", Uuid::new_v4().simple());
        let user = UserProfile::new(uid, username, achievements::catalog());

        self.db.upsert_user(&user).await?;
        self.db.set_session(username).await?;

        tracing::info!(username, uid = %user.uid, "Identity created");
        Ok(user)
    }

    /// Bind the session to an existing identity.
    pub async fn login(&self, username: &str) -> Result<UserProfile> {
        let user = self
            .db
            .get_user(username)
            .await?
            .ok_or_else(|| AppError::IdentityNotFound(username.to_string()))?;

        self.db.set_session(username).await?;

        tracing::info!(username, "Session started");
        Ok(user)
    }

    /// Clear the session. Idempotent; never fails on an absent session.
    pub async fn logout(&self) -> Result<()> {
        self.db.clear_session().await
    }

    /// The profile bound to the active session, or `None` when
    /// unauthenticated. Never fails: a dangling session username (user file
    /// lost to fail-open recovery) reads as unauthenticated.
    pub async fn current_user(&self) -> Result<Option<UserProfile>> {
        match self.db.session().await? {
            Some(username) => self.db.get_user(&username).await,
            None => Ok(None),
        }
    }
}

/// Usernames are 1..=32 chars of `[A-Za-z0-9_]`.
fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() || username.len() > 32 {
        return Err(AppError::BadRequest(
            "Username must be 1-32 characters".to_string(),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(AppError::BadRequest(
            "Username may only contain letters, digits, and underscores".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> IdentityService {
        IdentityService::new(SortifyDb::new_in_memory())
    }

    #[tokio::test]
    async fn test_signup_creates_zeroed_profile_with_locked_catalog() {
        let identity = service();
        let user = identity.signup("alice").await.unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(user.points, 0);
        assert_eq!(user.level, 1);
        assert_eq!(user.scans_count, 0);
        assert_eq!(user.streak, 0);
        assert_eq!(user.last_scan_date, None);
        assert_eq!(user.achievements.len(), achievements::catalog().len());
        assert!(user.achievements.iter().all(|a| !a.is_unlocked()));
    }

    #[tokio::test]
    async fn test_signup_binds_session() {
        let identity = service();
        identity.signup("alice").await.unwrap();

        let current = identity.current_user().await.unwrap().unwrap();
        assert_eq!(current.username, "alice");
    }

    #[tokio::test]
    async fn test_duplicate_signup_rejected() {
        let identity = service();
        identity.signup("alice").await.unwrap();

        let err = identity.signup("alice").await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateIdentity(_)));
    }

    #[tokio::test]
    async fn test_usernames_are_case_sensitive() {
        let identity = service();
        identity.signup("alice").await.unwrap();

        // Different capitalization is a different identity
        identity.signup("Alice").await.unwrap();
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let identity = service();
        let err = identity.login("ghost").await.unwrap_err();
        assert!(matches!(err, AppError::IdentityNotFound(_)));
    }

    #[tokio::test]
    async fn test_login_switches_session() {
        let identity = service();
        identity.signup("alice").await.unwrap();
        identity.signup("bob").await.unwrap();

        identity.login("alice").await.unwrap();
        let current = identity.current_user().await.unwrap().unwrap();
        assert_eq!(current.username, "alice");
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let identity = service();
        identity.signup("alice").await.unwrap();

        identity.logout().await.unwrap();
        identity.logout().await.unwrap();
        assert!(identity.current_user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_usernames_rejected() {
        let identity = service();
        for name in ["", "has space", "emoji🌱", &"x".repeat(33)] {
            let err = identity.signup(name).await.unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "{:?}", name);
        }
    }
}
