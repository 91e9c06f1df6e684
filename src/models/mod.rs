// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod scan;
pub mod user;

pub use scan::{BinCategory, Classification, ScanRecord};
pub use user::{level_for_points, Achievement, UserProfile};
