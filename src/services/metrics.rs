use crate::error::{ForecastError, Result};
use crate::models::forecast::{FeatureImportanceEntry, MetricComparison};

/// Relative improvement of `optimized` over `baseline`, in percent.
///
/// `lower_is_better` selects the direction: for error metrics (RMSE, MAE) a
/// drop is an improvement, for scores (R²) a rise is. The sign of the result
/// is positive iff the optimized value is actually better. A zero or
/// non-finite baseline has no meaningful relative improvement and is rejected
/// instead of letting NaN/∞ reach display code.
pub fn improvement_percent(baseline: f64, optimized: f64, lower_is_better: bool) -> Result<f64> {
    if baseline == 0.0 || !baseline.is_finite() || !optimized.is_finite() {
        return Err(ForecastError::InvalidMetric {
            title: String::new(),
            baseline,
        });
    }
    let delta = if lower_is_better {
        baseline - optimized
    } else {
        optimized - baseline
    };
    Ok(delta / baseline * 100.0)
}

/// Build a full [`MetricComparison`] record for one metric.
pub fn compare_metric(
    title: &str,
    baseline: f64,
    optimized: f64,
    unit: &str,
    lower_is_better: bool,
) -> Result<MetricComparison> {
    let improvement =
        improvement_percent(baseline, optimized, lower_is_better).map_err(|_| {
            ForecastError::InvalidMetric {
                title: title.to_string(),
                baseline,
            }
        })?;
    Ok(MetricComparison {
        title: title.to_string(),
        baseline_value: baseline,
        optimized_value: optimized,
        unit: unit.to_string(),
        lower_is_better,
        improvement_percent: improvement,
        is_improvement: improvement > 0.0,
    })
}

/// Sort entries by descending importance and reassign ranks 1..N.
///
/// The sort is stable, so ties keep their input order; ranking an
/// already-ranked sequence is a no-op.
pub fn rank_features(mut entries: Vec<FeatureImportanceEntry>) -> Vec<FeatureImportanceEntry> {
    entries.sort_by(|a, b| {
        b.importance
            .partial_cmp(&a.importance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i + 1;
    }
    entries
}

/// Baseline AdaBoost vs FI-AdaBoost comparison shown on the analytics view.
pub fn model_comparisons() -> Result<Vec<MetricComparison>> {
    Ok(vec![
        compare_metric("Root Mean Square Error", 0.854, 0.696, "kWh/m²/day", true)?,
        compare_metric("Mean Absolute Error", 0.652, 0.512, "kWh/m²/day", true)?,
        compare_metric("Coefficient of Determination (R²)", 0.823, 0.891, "", false)?,
    ])
}

/// Normalized FI-AdaBoost feature weights, served ranked.
pub fn feature_importances() -> Vec<FeatureImportanceEntry> {
    rank_features(vec![
        FeatureImportanceEntry::unranked("Clear Sky Ratio", 0.28),
        FeatureImportanceEntry::unranked("Sunshine Hours", 0.25),
        FeatureImportanceEntry::unranked("Solar Exposure Index", 0.21),
        FeatureImportanceEntry::unranked("Cloud Cover", 0.14),
        FeatureImportanceEntry::unranked("Temperature", 0.07),
        FeatureImportanceEntry::unranked("Humidity", 0.03),
        FeatureImportanceEntry::unranked("Wind Speed", 0.02),
        FeatureImportanceEntry::unranked("Precipitation", 0.01),
    ])
}
