// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sortify: gamified waste sorting backend
//!
//! This crate provides the backend API for classifying waste photos and
//! turning each classification into durable progression state (points,
//! level, streak, achievements) on the user's profile.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::SortifyDb;
use services::GeminiClassifier;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: SortifyDb,
    pub classifier: GeminiClassifier,
}
