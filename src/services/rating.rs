use crate::models::forecast::{ColorTier, RatingTier, SolarRating};

/// Full-scale solar potential for the progress-bar percentage (kWh/m²/day).
pub const FULL_SCALE_KWH: f64 = 7.0;

/// Ordered threshold table, best tier first. `classify` walks it with `>=`,
/// so the thresholds are closed lower bounds and the last row (NEG_INFINITY)
/// catches everything else. Single source of truth for tier, label, color
/// and description.
const RATING_TABLE: [(f64, RatingTier, ColorTier, &str, &str); 4] = [
    (
        5.5,
        RatingTier::Excellent,
        ColorTier::Emerald,
        "Excellent",
        "Outstanding solar energy potential. Ideal for solar panel installation with high ROI expected.",
    ),
    (
        4.5,
        RatingTier::VeryGood,
        ColorTier::Blue,
        "Very Good",
        "Strong solar energy potential. Great conditions for solar panel system installation.",
    ),
    (
        3.5,
        RatingTier::Good,
        ColorTier::Amber,
        "Good",
        "Moderate solar energy potential. Solar installation is viable with reasonable returns.",
    ),
    (
        f64::NEG_INFINITY,
        RatingTier::Fair,
        ColorTier::Orange,
        "Fair",
        "Lower solar energy potential. Consider optimizing panel placement and angle.",
    ),
];

/// Classify a solar-potential value (kWh/m²/day) into its rating tier.
/// Total over finite inputs: every value lands in exactly one row.
pub fn classify(potential: f64) -> SolarRating {
    let row = RATING_TABLE
        .iter()
        .find(|(threshold, ..)| potential >= *threshold)
        .unwrap_or(&RATING_TABLE[RATING_TABLE.len() - 1]);
    SolarRating {
        tier: row.1,
        color_tier: row.2,
        label: row.3,
        description: row.4,
    }
}

/// Progress-bar value for a potential: clamp(p / 7 * 100, 0, 100).
pub fn potential_percent(potential: f64) -> f64 {
    (potential / FULL_SCALE_KWH * 100.0).clamp(0.0, 100.0)
}
