mod routes;
mod controllers;
mod services;
mod models;
mod api_docs;
mod shared_state;
mod config;
mod error;
#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{response::Html, routing::get, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_scalar::Scalar;

use crate::api_docs::ApiDoc;
use crate::config::Config;
use crate::routes::forecast_routes::api_routes;
use crate::services::catalog::RooftopCatalog;
use crate::services::estimator::MockEstimator;
use crate::shared_state::{AppState, SharedState};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solar_forecast_sim=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 1. Load configuration
    let config = match Config::load("config.json") {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config.json: {}", e);
            return;
        }
    };

    // 2. Build the read-only catalog and the mock estimation engine
    let catalog = RooftopCatalog::generate(config.catalog.seed, config.catalog.size);
    info!(
        "Rooftop catalog generated: {} records (seed {})",
        catalog.len(),
        config.catalog.seed
    );

    let estimator = Arc::new(MockEstimator::new(
        config.estimator.seed,
        Duration::from_millis(config.estimator.delay_ms),
    ));

    // 3. Session state — the one mutable cell of the system
    let state = AppState::new(catalog, estimator);
    let shared = SharedState { state, config: config.clone() };

    // 4. Start the Axum HTTP server
    let app = Router::new()
        .nest("/api", api_routes(shared))
        .route("/scalar", get(|| async {
            Html(Scalar::new(ApiDoc::openapi()).to_html())
        }))
        .fallback_service(ServeDir::new("static"))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("API server listening on http://{}", addr);
    info!("Scalar UI: http://{}/scalar", addr);

    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
