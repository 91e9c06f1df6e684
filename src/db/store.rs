// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON-file-backed store with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile storage, keyed by username)
//! - Scans (bounded newest-first list)
//! - Session (the single currently-authenticated username)
//!
//! Each collection lives in its own file under the data directory and is
//! loaded once at startup. Reads of malformed data fail open: a file that
//! does not parse is treated as an empty collection (logged at warn) so a
//! corrupt store degrades to a fresh one instead of taking the app down.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{ScanRecord, UserProfile};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Retention cap on the scans collection. Oldest entries beyond this are
/// silently dropped on append.
pub const MAX_STORED_SCANS: usize = 100;

#[derive(Debug, Default)]
struct Collections {
    users: HashMap<String, UserProfile>,
    scans: Vec<ScanRecord>,
    session: Option<String>,
}

/// Store handle. Cheap to clone; all clones share one in-memory state.
#[derive(Clone)]
pub struct SortifyDb {
    inner: Arc<RwLock<Collections>>,
    data_dir: Option<PathBuf>,
}

impl SortifyDb {
    /// Open the store rooted at `data_dir`, creating the directory if needed
    /// and loading whatever collection files already exist.
    pub async fn open(data_dir: &Path) -> Result<Self, AppError> {
        tokio::fs::create_dir_all(data_dir)
            .await
            .map_err(|e| AppError::Database(format!("Failed to create data dir: {}", e)))?;

        let collections = Collections {
            users: load_collection(data_dir, collections::USERS).await,
            scans: load_collection(data_dir, collections::SCANS).await,
            session: load_collection(data_dir, collections::SESSION).await,
        };

        tracing::info!(
            path = %data_dir.display(),
            users = collections.users.len(),
            scans = collections.scans.len(),
            "Store opened"
        );

        Ok(Self {
            inner: Arc::new(RwLock::new(collections)),
            data_dir: Some(data_dir.to_path_buf()),
        })
    }

    /// Create an in-memory store that never touches disk (for tests).
    pub fn new_in_memory() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Collections::default())),
            data_dir: None,
        }
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by username (exact, case-sensitive match).
    pub async fn get_user(&self, username: &str) -> Result<Option<UserProfile>, AppError> {
        Ok(self.inner.read().await.users.get(username).cloned())
    }

    /// Create or update a user, keyed by username.
    pub async fn upsert_user(&self, user: &UserProfile) -> Result<(), AppError> {
        let mut guard = self.inner.write().await;
        let mut users = guard.users.clone();
        users.insert(user.username.clone(), user.clone());
        self.flush(collections::USERS, &users).await?;
        guard.users = users;
        Ok(())
    }

    /// All stored users, in no particular order.
    pub async fn list_users(&self) -> Result<Vec<UserProfile>, AppError> {
        Ok(self.inner.read().await.users.values().cloned().collect())
    }

    // ─── Scan Operations ─────────────────────────────────────────

    /// Insert a scan at the head of the list and apply the retention cap.
    pub async fn append_scan(&self, record: &ScanRecord) -> Result<(), AppError> {
        let mut guard = self.inner.write().await;
        let mut scans = guard.scans.clone();
        scans.insert(0, record.clone());
        scans.truncate(MAX_STORED_SCANS);
        self.flush(collections::SCANS, &scans).await?;
        guard.scans = scans;
        Ok(())
    }

    /// All retained scans owned by a user, newest first.
    pub async fn scans_for_user(&self, user_id: &str) -> Result<Vec<ScanRecord>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .scans
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    // ─── Session Operations ──────────────────────────────────────

    /// The currently-authenticated username, if any.
    pub async fn session(&self) -> Result<Option<String>, AppError> {
        Ok(self.inner.read().await.session.clone())
    }

    /// Bind the session to a username.
    pub async fn set_session(&self, username: &str) -> Result<(), AppError> {
        let mut guard = self.inner.write().await;
        let session = Some(username.to_string());
        self.flush(collections::SESSION, &session).await?;
        guard.session = session;
        Ok(())
    }

    /// Clear the session. Idempotent.
    pub async fn clear_session(&self) -> Result<(), AppError> {
        let mut guard = self.inner.write().await;
        let session: Option<String> = None;
        self.flush(collections::SESSION, &session).await?;
        guard.session = session;
        Ok(())
    }

    // ─── Combined Scan Write ─────────────────────────────────────

    /// Persist an updated profile together with its new scan record.
    ///
    /// Both mutations are staged, flushed, and only then committed into the
    /// in-memory state under a single write guard: a failed flush leaves
    /// every subsequent read seeing the pre-call state, and a successful
    /// return means both changes are visible together. Durability is not
    /// transactional across the two collection files: a crash (or failure)
    /// between the users flush and the scans flush leaves the on-disk
    /// profile updated with the scan record missing after a restart.
    /// Callers must treat that window as unhandled.
    pub async fn record_scan_txn(
        &self,
        user: &UserProfile,
        scan: &ScanRecord,
    ) -> Result<(), AppError> {
        let mut guard = self.inner.write().await;

        let mut users = guard.users.clone();
        users.insert(user.username.clone(), user.clone());
        let mut scans = guard.scans.clone();
        scans.insert(0, scan.clone());
        scans.truncate(MAX_STORED_SCANS);

        self.flush(collections::USERS, &users).await?;
        self.flush(collections::SCANS, &scans).await?;

        guard.users = users;
        guard.scans = scans;
        Ok(())
    }

    // ─── Flush Helper ────────────────────────────────────────────

    /// Write one collection to its file via a temp-file rename.
    async fn flush<T: Serialize>(&self, name: &str, value: &T) -> Result<(), AppError> {
        let Some(dir) = &self.data_dir else {
            return Ok(()); // in-memory store
        };

        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|e| AppError::Database(format!("Failed to serialize {}: {}", name, e)))?;

        let path = collection_path(dir, name);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| AppError::Database(format!("Failed to write {}: {}", name, e)))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| AppError::Database(format!("Failed to persist {}: {}", name, e)))?;
        Ok(())
    }
}

fn collection_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.json", name))
}

/// Load one collection, failing open to the default on any error.
async fn load_collection<T: DeserializeOwned + Default>(dir: &Path, name: &str) -> T {
    let path = collection_path(dir, name);
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
        Err(e) => {
            tracing::warn!(collection = name, error = %e, "Unreadable collection file, starting empty");
            return T::default();
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(collection = name, error = %e, "Malformed collection file, starting empty");
            T::default()
        }
    }
}
