//! Crop Viability Service - Backend Server
//!
//! Classifies weather station readings into climate profiles and reports
//! which crops are viable under the current conditions.

use axum::{routing::get, Router};
use shared::Classifier;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;
use services::{HistoryStore, LiveState, SensorPoller};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub classifier: Classifier<'static>,
    pub history: Arc<HistoryStore>,
    pub live: LiveState,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cv_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Crop Viability Server");
    tracing::info!("Environment: {}", config.environment);

    // Malformed cluster or crop tables are fatal
    let classifier = Classifier::standard()?;
    tracing::info!(
        "Classifier ready: {} climate profiles, {} crops",
        classifier.clusters().len(),
        classifier.crops().len()
    );

    tracing::info!("Loading history from {}", config.history.csv_path);
    let history = HistoryStore::from_config(&config.history)?;

    let live = LiveState::default();
    match SensorPoller::from_config(&config.sensor, live.clone())? {
        Some(poller) => {
            poller.spawn();
        }
        None => tracing::info!("No sensor feed configured, live readings disabled"),
    }

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        classifier,
        history: Arc::new(history),
        live,
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Crop Viability API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
