// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Record store (local JSON collections).

pub mod store;

pub use store::{SortifyDb, MAX_STORED_SCANS};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const SCANS: &str = "scans";
    /// Currently-authenticated username (single optional value)
    pub const SESSION: &str = "session";
}
