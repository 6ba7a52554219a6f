use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ForecastError;

// ─── Location ────────────────────────────────────────────────────────────────

/// A geographic position in decimal degrees.
///
/// [`Coordinate::new`] is the validating constructor — every user-supplied
/// pair goes through it. Displayed with 6 decimal digits per component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinate {
    /// Latitude in decimal degrees, -90 to +90
    pub latitude: f64,
    /// Longitude in decimal degrees, -180 to +180
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ForecastError> {
        let in_range = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !in_range {
            return Err(ForecastError::InvalidCoordinate { latitude, longitude });
        }
        Ok(Self { latitude, longitude })
    }

    /// Canonical display form: `"7.073100, 125.612800"`.
    pub fn canonical(&self) -> String {
        format!("{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

// ─── Compass orientation ─────────────────────────────────────────────────────

/// The 8 compass directions a rooftop (or panel azimuth) can face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Orientation {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl Orientation {
    pub const ALL: [Orientation; 8] = [
        Orientation::North,
        Orientation::Northeast,
        Orientation::East,
        Orientation::Southeast,
        Orientation::South,
        Orientation::Southwest,
        Orientation::West,
        Orientation::Northwest,
    ];

    /// Map an azimuth (degrees clockwise from North) to its 45° sector.
    /// Sector centers sit on the compass points, so North covers
    /// [337.5, 360) ∪ [0, 22.5).
    pub fn from_azimuth(azimuth_deg: f64) -> Self {
        let az = azimuth_deg.rem_euclid(360.0);
        let sector = ((az + 22.5) / 45.0) as usize % 8;
        Self::ALL[sector]
    }
}

// ─── Prediction ──────────────────────────────────────────────────────────────

/// One completed mock estimation. Immutable: a new request produces a fresh
/// record that supersedes (never merges with) the previous one.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PredictionResult {
    /// Identifier assigned when the estimation resolved
    pub estimation_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Predicted solar potential (kWh/m²/day)
    pub solar_potential: f64,
    /// Usable rooftop area (m²)
    pub rooftop_area: f64,
    /// Solar Exposure Index, 0..1
    pub solar_exposure_index: f64,
    /// Primary roof facing direction, derived from the azimuth
    pub orientation: Orientation,
    /// Panel azimuth (degrees clockwise from North, 0..360)
    pub azimuth: f64,
    /// Average daily sunshine (hours)
    pub sunshine_hours: f64,
    /// Average cloud coverage (%)
    pub cloud_cover: f64,
    /// Average ambient temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Ratio of actual to theoretical clear-sky irradiance, 0..1
    pub clear_sky_ratio: f64,
}

// ─── Rating ──────────────────────────────────────────────────────────────────

/// Discrete rating tiers for a solar-potential value, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RatingTier {
    Excellent,
    VeryGood,
    Good,
    Fair,
}

/// Visual tier consumed by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ColorTier {
    Emerald,
    Blue,
    Amber,
    Orange,
}

/// Derived classification of a solar-potential value. Not stored — computed
/// from [`PredictionResult::solar_potential`] on demand.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SolarRating {
    pub tier: RatingTier,
    pub label: &'static str,
    pub color_tier: ColorTier,
    pub description: &'static str,
}

// ─── Analytics ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeatureImportanceEntry {
    pub name: String,
    /// Normalized importance weight, 0..1
    pub importance: f64,
    /// Position after sorting by descending importance, 1..N
    pub rank: usize,
}

impl FeatureImportanceEntry {
    pub fn unranked(name: &str, importance: f64) -> Self {
        Self { name: name.to_string(), importance, rank: 0 }
    }
}

/// Baseline-vs-optimized comparison for one model metric, improvement math
/// included.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MetricComparison {
    pub title: String,
    pub baseline_value: f64,
    pub optimized_value: f64,
    pub unit: String,
    pub lower_is_better: bool,
    /// Positive iff the optimized value is better under the stated direction
    pub improvement_percent: f64,
    pub is_improvement: bool,
}

// ─── Rooftop catalog ─────────────────────────────────────────────────────────

/// One synthetic rooftop. Generated once at startup; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RooftopRecord {
    /// Unique id, `RT-0001` style
    pub id: String,
    pub barangay: String,
    /// Rooftop area (m²)
    pub area: f64,
    pub orientation: Orientation,
    /// Solar Exposure Index, 0..1
    pub solar_exposure: f64,
    /// Predicted Global Horizontal Irradiance (kWh/m²/day)
    pub predicted_ghi: f64,
    pub lat: f64,
    pub lon: f64,
}

/// Projected yearly output of a rooftop at its predicted GHI.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AnnualProjection {
    /// Total energy (MWh/year)
    pub energy_mwh: f64,
    /// CO₂ offset (tons/year)
    pub co2_tons: f64,
}

// ─── REST API request/response types ─────────────────────────────────────────

/// Free-text latitude/longitude fields, as typed into the two inputs.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ManualLocationRequest {
    pub latitude: String,
    pub longitude: String,
}

/// Result of the device geolocation callback. Absent or partial coordinates
/// mean the capability failed or was denied.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct GeolocationRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MapClickRequest {
    pub lat: f64,
    pub lng: f64,
}

/// Instruction for the map collaborator to recenter on a point.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecenterCommand {
    pub lat: f64,
    pub lng: f64,
    pub zoom: u8,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionLocationResponse {
    pub coordinate: Coordinate,
    /// Address text shown next to the inputs; the canonical coordinate string
    /// unless the fallback label applies
    pub address: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MapClickResponse {
    pub coordinate: Coordinate,
    pub address: String,
    pub recenter: RecenterCommand,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PredictionResponse {
    pub prediction: PredictionResult,
    pub rating: SolarRating,
    /// Progress-bar value: clamp(potential / 7 * 100, 0, 100)
    pub potential_percent: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RooftopDetailResponse {
    pub rooftop: RooftopRecord,
    pub projection: AnnualProjection,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub rooftops_loaded: usize,
    pub estimation_pending: bool,
}
