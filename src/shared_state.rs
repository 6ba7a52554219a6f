use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use axum::extract::FromRef;

use crate::config::Config;
use crate::models::forecast::{Coordinate, PredictionResult};
use crate::services::catalog::RooftopCatalog;
use crate::services::estimator::Estimator;

/// The session's only mutable cell: the currently selected location and the
/// last completed prediction. Updated through the setters below; the core
/// services stay pure.
#[derive(Debug, Default)]
struct Session {
    coordinate: Option<Coordinate>,
    address: String,
    prediction: Option<PredictionResult>,
}

#[derive(Clone)]
pub struct AppState {
    session: Arc<RwLock<Session>>,
    /// True while an estimation is in flight — at most one per session
    pending: Arc<AtomicBool>,
    pub catalog: Arc<RooftopCatalog>,
    pub estimator: Arc<dyn Estimator>,
}

impl AppState {
    pub fn new(catalog: RooftopCatalog, estimator: Arc<dyn Estimator>) -> Self {
        Self {
            session: Arc::new(RwLock::new(Session::default())),
            pending: Arc::new(AtomicBool::new(false)),
            catalog: Arc::new(catalog),
            estimator,
        }
    }

    /// Overwrite the current location (last writer wins, whatever the source).
    pub fn set_location(&self, coordinate: Coordinate, address: String) {
        if let Ok(mut session) = self.session.write() {
            session.coordinate = Some(coordinate);
            session.address = address;
        }
    }

    pub fn location(&self) -> Option<(Coordinate, String)> {
        let session = self.session.read().ok()?;
        session.coordinate.map(|c| (c, session.address.clone()))
    }

    /// Replace the previous prediction; results supersede, never merge.
    pub fn set_prediction(&self, prediction: PredictionResult) {
        if let Ok(mut session) = self.session.write() {
            session.prediction = Some(prediction);
        }
    }

    pub fn prediction(&self) -> Option<PredictionResult> {
        self.session.read().ok().and_then(|s| s.prediction.clone())
    }

    /// Claim the single estimation slot. Returns false when one is already
    /// in flight, in which case the caller must treat predict as a no-op.
    pub fn begin_estimation(&self) -> bool {
        self.pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn finish_estimation(&self) {
        self.pending.store(false, Ordering::Release);
    }

    pub fn estimation_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

/// Bundles `AppState` and `Config` so handlers can extract either via
/// `FromRef` with a single `.with_state(shared)`.
#[derive(Clone)]
pub struct SharedState {
    pub state: AppState,
    pub config: Config,
}

impl FromRef<SharedState> for AppState {
    fn from_ref(shared: &SharedState) -> Self {
        shared.state.clone()
    }
}

impl FromRef<SharedState> for Config {
    fn from_ref(shared: &SharedState) -> Self {
        shared.config.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::estimator::MockEstimator;
    use std::time::Duration;

    fn state() -> AppState {
        AppState::new(
            RooftopCatalog::generate(1, 5),
            Arc::new(MockEstimator::new(1, Duration::ZERO)),
        )
    }

    #[test]
    fn location_starts_unset_and_last_writer_wins() {
        let state = state();
        assert!(state.location().is_none());

        let manual = Coordinate::new(10.0, 120.0).unwrap();
        state.set_location(manual, manual.canonical());
        let click = Coordinate::new(7.1, 125.5).unwrap();
        state.set_location(click, click.canonical());

        let (current, address) = state.location().unwrap();
        assert_eq!(current, click);
        assert_eq!(address, "7.100000, 125.500000");
    }

    #[test]
    fn only_one_estimation_slot() {
        let state = state();
        assert!(!state.estimation_pending());
        assert!(state.begin_estimation());
        assert!(state.estimation_pending());
        // second claim while pending is refused
        assert!(!state.begin_estimation());
        state.finish_estimation();
        assert!(state.begin_estimation());
    }
}
