// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sortify API Server
//!
//! Classifies waste photos with Gemini and tracks each user's sorting
//! progression: experience points, level, daily streak, and achievements.

use sortify::{config::Config, db::SortifyDb, services::GeminiClassifier, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Sortify API");

    // Open the record store
    let db = SortifyDb::open(&config.data_dir)
        .await
        .expect("Failed to open record store");

    // Initialize the Gemini classifier
    let classifier = GeminiClassifier::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
    );
    tracing::info!(model = %config.gemini_model, "Classifier initialized");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        classifier,
    });

    // Build router
    let app = sortify::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sortify=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
