mod chat;
mod errors;
mod feed;
mod metrics;
mod model;
mod profile;
mod ranking;
mod rest;
mod validate;
mod walks;

use chat::GeminiClient;
use feed::TelemetryState;
use profile::ProfileStore;
use simulator::{SimulatorConfig, WearableSimulator};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tracing::{error, info, warn};
use walks::WalkTracker;

#[tokio::main]
async fn main() {
    let http_addr = env::var("HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let profile_path =
        env::var("PROFILE_PATH").unwrap_or_else(|_| "data/profile.json".to_string());
    let gemini_base_url = env::var("GEMINI_BASE_URL")
        .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());
    let gemini_api_key = env::var("GEMINI_API_KEY").unwrap_or_default();
    let emission_interval_ms: u64 = env::var("EMISSION_INTERVAL_MS")
        .unwrap_or_else(|_| "5000".to_string())
        .parse()
        .unwrap_or(5000);

    // Initialize logging
    tracing_subscriber::fmt::init();

    info!("Starting pet-care companion server");
    info!("HTTP server: {}", http_addr);
    info!("Profile store: {}", profile_path);
    info!("Sample emission interval: {}ms", emission_interval_ms);
    if gemini_api_key.is_empty() {
        warn!("GEMINI_API_KEY is not set; chat calls will be rejected by the backend");
    }

    // Initialize metrics
    metrics::init_metrics();

    // Start the wearable simulator and its two streams
    let config = SimulatorConfig {
        emission_interval: Duration::from_millis(emission_interval_ms),
        ..SimulatorConfig::default()
    };
    let sim = WearableSimulator::new(config);
    let (samples, snapshots) = sim.into_streams();

    let (latest_tx, latest_rx) = watch::channel(None);
    let history = Arc::new(RwLock::new(Vec::new()));
    let walk_tracker = Arc::new(RwLock::new(WalkTracker::default()));

    let telemetry = TelemetryState {
        latest: latest_rx,
        history: history.clone(),
        walks: walk_tracker.clone(),
    };
    let feed_handle = tokio::spawn(feed::run_feed(
        samples,
        snapshots,
        latest_tx,
        history,
        walk_tracker,
    ));

    // Build HTTP app
    let profiles = ProfileStore::new(&profile_path);
    if !profiles.exists().await {
        info!("No pet profile saved yet; chat stays unavailable until one is created");
    }
    let state = rest::AppState {
        telemetry,
        profiles,
        chat: GeminiClient::new(gemini_base_url, gemini_api_key),
    };
    let app = rest::create_router(state);

    // Start HTTP server
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .unwrap_or_else(|e| {
            error!("Failed to bind to {}: {}", http_addr, e);
            std::process::exit(1);
        });

    info!("HTTP server listening on {}", http_addr);

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap_or_else(|e| {
            error!("HTTP server error: {}", e);
        });
    });

    tokio::select! {
        _ = feed_handle => {
            error!("Telemetry feed terminated");
        }
        _ = server_handle => {
            error!("HTTP server terminated");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    info!("Shutting down");
}
