// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod achievements;
pub mod classifier;
pub mod identity;
pub mod leaderboard;
pub mod progression;

pub use classifier::GeminiClassifier;
pub use identity::IdentityService;
pub use progression::ScanProcessor;
