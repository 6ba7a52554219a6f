use axum::{
    routing::{get, post},
    Router,
};

use crate::controllers::forecast_controller::{
    // Session: location sources & prediction
    get_location, set_manual_location, geolocate, map_click, predict, get_prediction,
    // Analytics
    get_model_metrics, get_feature_importance,
    // Rooftop catalog
    list_rooftops, get_rooftop,
    // Health
    health,
};
use crate::shared_state::SharedState;

/// Build the `/api/*` sub-router.
/// Handlers extract `State<AppState>` and/or `State<Config>` via
/// `FromRef<SharedState>` — a single `.with_state(shared)` covers both.
pub fn api_routes(shared: SharedState) -> Router {
    Router::new()
        .route("/health",                        get(health))
        .route("/session/location",              get(get_location).put(set_manual_location))
        .route("/session/location/geolocate",    post(geolocate))
        .route("/session/location/map-click",    post(map_click))
        .route("/session/predict",               post(predict))
        .route("/session/prediction",            get(get_prediction))
        .route("/analytics/metrics",             get(get_model_metrics))
        .route("/analytics/features",            get(get_feature_importance))
        .route("/rooftops",                      get(list_rooftops))
        .route("/rooftops/{id}",                 get(get_rooftop))
        .with_state(shared)
}
