use utoipa::OpenApi;

use crate::controllers::forecast_controller;
use crate::error;
use crate::models::forecast;

#[derive(OpenApi)]
#[openapi(
    paths(
        forecast_controller::health,
        forecast_controller::get_location,
        forecast_controller::set_manual_location,
        forecast_controller::geolocate,
        forecast_controller::map_click,
        forecast_controller::predict,
        forecast_controller::get_prediction,
        forecast_controller::get_model_metrics,
        forecast_controller::get_feature_importance,
        forecast_controller::list_rooftops,
        forecast_controller::get_rooftop
    ),
    components(
        schemas(
            forecast::Coordinate,
            forecast::Orientation,
            forecast::PredictionResult,
            forecast::SolarRating,
            forecast::RatingTier,
            forecast::ColorTier,
            forecast::FeatureImportanceEntry,
            forecast::MetricComparison,
            forecast::RooftopRecord,
            forecast::AnnualProjection,
            forecast::ManualLocationRequest,
            forecast::GeolocationRequest,
            forecast::MapClickRequest,
            forecast::RecenterCommand,
            forecast::SessionLocationResponse,
            forecast::MapClickResponse,
            forecast::PredictionResponse,
            forecast::RooftopDetailResponse,
            forecast::HealthStatus,
            error::ErrorResponse
        )
    ),
    tags(
        (name = "solar-forecast-sim", description = "Solar Potential Forecasting API")
    )
)]
pub struct ApiDoc;
