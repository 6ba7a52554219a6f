use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Error types for the forecasting core
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Latitude/longitude pair outside the valid ranges or non-finite
    #[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// Free-text coordinate field that does not parse as a finite number
    #[error("cannot parse coordinate field '{0}'")]
    CoordinateParse(String),

    /// Metric comparison against a zero or non-finite baseline
    #[error("invalid metric '{title}': baseline {baseline} is not comparable")]
    InvalidMetric { title: String, baseline: f64 },

    /// A predict request arrived while an estimation is already in flight
    #[error("an estimation is already in flight")]
    EstimationPending,

    /// Estimation backend failure — unreachable with the mock engine, part of
    /// the contract for real-model substitutions
    #[error("estimation failed: {0}")]
    EstimationFailed(String),

    /// Predict requested before any location was selected
    #[error("no location selected")]
    NoLocation,

    /// Rooftop id lookup miss
    #[error("rooftop '{0}' not found")]
    RooftopNotFound(String),
}

/// Type alias for Result with ForecastError
pub type Result<T> = std::result::Result<T, ForecastError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ForecastError {
    fn into_response(self) -> Response {
        let status = match &self {
            ForecastError::InvalidCoordinate { .. }
            | ForecastError::CoordinateParse(_)
            | ForecastError::InvalidMetric { .. }
            | ForecastError::NoLocation => StatusCode::UNPROCESSABLE_ENTITY,
            ForecastError::EstimationPending => StatusCode::CONFLICT,
            ForecastError::EstimationFailed(_) => StatusCode::BAD_GATEWAY,
            ForecastError::RooftopNotFound(_) => StatusCode::NOT_FOUND,
        };
        let body = ErrorResponse { error: self.to_string() };
        (status, Json(body)).into_response()
    }
}
