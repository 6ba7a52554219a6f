use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::Result;
use crate::models::forecast::{Coordinate, Orientation, PredictionResult};
use crate::services::rng::Prng;

/// Boundary behind which the prediction model lives.
///
/// The shipped implementation is a bounded-random stand-in, but the contract
/// is written for a real model: estimation is asynchronous and fallible
/// (`ForecastError::EstimationFailed` for backend errors). Swapping the model
/// must not touch rating, comparison or catalog logic.
#[async_trait]
pub trait Estimator: Send + Sync {
    async fn estimate(&self, location: Coordinate) -> Result<PredictionResult>;
}

/// Mock engine: every field drawn independently from a fixed uniform range
/// anchored to a domain-plausible baseline, after an artificial delay that
/// stands in for inference latency. Cannot fail.
pub struct MockEstimator {
    delay: Duration,
    rng: Mutex<Prng>,
}

impl MockEstimator {
    pub fn new(seed: u64, delay: Duration) -> Self {
        Self {
            delay,
            rng: Mutex::new(Prng::new(seed)),
        }
    }

    fn draw(&self, _location: Coordinate) -> PredictionResult {
        // The declared ranges are contractual: downstream rating thresholds
        // are exercised by exactly these bounds.
        let mut rng = self.rng.lock().expect("estimator rng poisoned");
        let azimuth = rng.in_range(155.0, 175.0);
        PredictionResult {
            estimation_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            solar_potential: rng.in_range(5.2, 6.0),
            rooftop_area: rng.in_range(85.0, 115.0),
            solar_exposure_index: rng.in_range(0.75, 0.90),
            orientation: Orientation::from_azimuth(azimuth),
            azimuth,
            sunshine_hours: rng.in_range(7.5, 9.0),
            cloud_cover: rng.in_range(30.0, 50.0),
            temperature: rng.in_range(28.0, 32.0),
            humidity: rng.in_range(65.0, 80.0),
            clear_sky_ratio: rng.in_range(0.68, 0.83),
        }
    }
}

#[async_trait]
impl Estimator for MockEstimator {
    async fn estimate(&self, location: Coordinate) -> Result<PredictionResult> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.draw(location))
    }
}
