use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;

use crate::config::Config;
use crate::error::ForecastError;
use crate::models::forecast::{
    FeatureImportanceEntry, GeolocationRequest, HealthStatus, ManualLocationRequest,
    MapClickRequest, MapClickResponse, MetricComparison, PredictionResponse, RecenterCommand,
    RooftopDetailResponse, RooftopRecord, SessionLocationResponse,
};
use crate::services::catalog::{annual_projection, SortField};
use crate::services::{location, metrics, rating};
use crate::shared_state::AppState;

/// Map zoom applied when recentering on a clicked point.
const RECENTER_ZOOM: u8 = 16;

/// GET /api/health
/// Service health
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service health", body = HealthStatus)
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        rooftops_loaded: state.catalog.len(),
        estimation_pending: state.estimation_pending(),
    })
}

/// GET /api/session/location
/// Current session location
///
/// Returns the coordinate and address text currently selected, whatever
/// source last set them.
#[utoipa::path(
    get,
    path = "/api/session/location",
    responses(
        (status = 200, description = "Currently selected location", body = SessionLocationResponse),
        (status = 404, description = "No location selected yet")
    )
)]
pub async fn get_location(State(state): State<AppState>) -> impl IntoResponse {
    if let Some((coordinate, address)) = state.location() {
        Json(SessionLocationResponse { coordinate, address }).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "no location selected"})),
        )
            .into_response()
    }
}

/// PUT /api/session/location
/// Set the location from the two free-text fields
///
/// Both fields must parse as finite numbers within range; otherwise the
/// request is rejected and the session location is left untouched.
#[utoipa::path(
    put,
    path = "/api/session/location",
    request_body = ManualLocationRequest,
    responses(
        (status = 200, description = "Location accepted", body = SessionLocationResponse),
        (status = 422, description = "Malformed or out-of-range coordinate")
    )
)]
pub async fn set_manual_location(
    State(state): State<AppState>,
    Json(req): Json<ManualLocationRequest>,
) -> Result<Json<SessionLocationResponse>, ForecastError> {
    let coordinate = location::parse_manual(&req.latitude, &req.longitude)?;
    let address = coordinate.canonical();
    state.set_location(coordinate, address.clone());
    Ok(Json(SessionLocationResponse { coordinate, address }))
}

/// POST /api/session/location/geolocate
/// Apply a device geolocation result
///
/// A valid fix overwrites any prior manual entry. Failure or absence of the
/// capability falls back to the configured default location.
#[utoipa::path(
    post,
    path = "/api/session/location/geolocate",
    request_body = GeolocationRequest,
    responses(
        (status = 200, description = "Applied fix or fallback", body = SessionLocationResponse)
    )
)]
pub async fn geolocate(
    State(config): State<Config>,
    State(state): State<AppState>,
    Json(req): Json<GeolocationRequest>,
) -> Json<SessionLocationResponse> {
    let (coordinate, address) =
        location::resolve_geolocation(req.latitude, req.longitude, &config.default_location);
    state.set_location(coordinate, address.clone());
    Json(SessionLocationResponse { coordinate, address })
}

/// POST /api/session/location/map-click
/// Apply a map click
///
/// Always overwrites the current coordinate and address, and tells the map
/// collaborator to recenter on the clicked point.
#[utoipa::path(
    post,
    path = "/api/session/location/map-click",
    request_body = MapClickRequest,
    responses(
        (status = 200, description = "Clicked point applied", body = MapClickResponse),
        (status = 422, description = "Click outside valid coordinate ranges")
    )
)]
pub async fn map_click(
    State(state): State<AppState>,
    Json(req): Json<MapClickRequest>,
) -> Result<Json<MapClickResponse>, ForecastError> {
    let (coordinate, address) = location::resolve_map_click(req.lat, req.lng)?;
    state.set_location(coordinate, address.clone());
    Ok(Json(MapClickResponse {
        coordinate,
        address,
        recenter: RecenterCommand {
            lat: coordinate.latitude,
            lng: coordinate.longitude,
            zoom: RECENTER_ZOOM,
        },
    }))
}

/// POST /api/session/predict
/// Run one estimation for the selected location
///
/// At most one estimation may be in flight per session; a request arriving
/// while one is pending is a no-op answered with 409.
#[utoipa::path(
    post,
    path = "/api/session/predict",
    responses(
        (status = 200, description = "Estimation completed", body = PredictionResponse),
        (status = 409, description = "An estimation is already in flight"),
        (status = 422, description = "No location selected")
    )
)]
pub async fn predict(
    State(state): State<AppState>,
) -> Result<Json<PredictionResponse>, ForecastError> {
    let (coordinate, _) = state.location().ok_or(ForecastError::NoLocation)?;
    if !state.begin_estimation() {
        return Err(ForecastError::EstimationPending);
    }

    let result = state.estimator.estimate(coordinate).await;
    state.finish_estimation();
    let prediction = result?;

    info!(
        estimation_id = %prediction.estimation_id,
        potential = prediction.solar_potential,
        "estimation completed for {}",
        coordinate.canonical()
    );
    state.set_prediction(prediction.clone());

    Ok(Json(PredictionResponse {
        rating: rating::classify(prediction.solar_potential),
        potential_percent: rating::potential_percent(prediction.solar_potential),
        prediction,
    }))
}

/// GET /api/session/prediction
/// Last completed prediction
#[utoipa::path(
    get,
    path = "/api/session/prediction",
    responses(
        (status = 200, description = "Last completed prediction", body = PredictionResponse),
        (status = 404, description = "No prediction yet")
    )
)]
pub async fn get_prediction(State(state): State<AppState>) -> impl IntoResponse {
    if let Some(prediction) = state.prediction() {
        Json(PredictionResponse {
            rating: rating::classify(prediction.solar_potential),
            potential_percent: rating::potential_percent(prediction.solar_potential),
            prediction,
        })
        .into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "no prediction yet"})),
        )
            .into_response()
    }
}

/// GET /api/analytics/metrics
/// Baseline vs optimized model comparison
#[utoipa::path(
    get,
    path = "/api/analytics/metrics",
    responses(
        (status = 200, description = "Model metric comparisons", body = [MetricComparison])
    )
)]
pub async fn get_model_metrics() -> Result<Json<Vec<MetricComparison>>, ForecastError> {
    Ok(Json(metrics::model_comparisons()?))
}

/// GET /api/analytics/features
/// Ranked feature importances
#[utoipa::path(
    get,
    path = "/api/analytics/features",
    responses(
        (status = 200, description = "Ranked feature importances", body = [FeatureImportanceEntry])
    )
)]
pub async fn get_feature_importance() -> impl IntoResponse {
    Json(metrics::feature_importances())
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RooftopQuery {
    /// Case-insensitive substring matched against id or barangay
    pub search: Option<String>,
    /// Numeric field to sort by, descending (default solar_exposure)
    pub sort_by: Option<SortField>,
}

/// GET /api/rooftops
/// Search and sort the rooftop catalog
#[utoipa::path(
    get,
    path = "/api/rooftops",
    params(RooftopQuery),
    responses(
        (status = 200, description = "Matching rooftops, sorted descending", body = [RooftopRecord])
    )
)]
pub async fn list_rooftops(
    State(state): State<AppState>,
    Query(query): Query<RooftopQuery>,
) -> impl IntoResponse {
    let term = query.search.unwrap_or_default();
    let sort = query.sort_by.unwrap_or_default();
    let records: Vec<_> = state
        .catalog
        .query(&term, sort)
        .into_iter()
        .cloned()
        .collect();
    Json(records)
}

/// GET /api/rooftops/{id}
/// One rooftop with its annual projection
#[utoipa::path(
    get,
    path = "/api/rooftops/{id}",
    params(
        ("id" = String, Path, description = "Rooftop id, RT-0001 style")
    ),
    responses(
        (status = 200, description = "Rooftop detail", body = RooftopDetailResponse),
        (status = 404, description = "Rooftop not found")
    )
)]
pub async fn get_rooftop(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<RooftopDetailResponse>, ForecastError> {
    let rooftop = state
        .catalog
        .get(&id)
        .cloned()
        .ok_or_else(|| ForecastError::RooftopNotFound(id))?;
    let projection = annual_projection(&rooftop);
    Ok(Json(RooftopDetailResponse { rooftop, projection }))
}
