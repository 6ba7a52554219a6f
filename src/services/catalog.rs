use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::forecast::{AnnualProjection, Orientation, RooftopRecord};
use crate::services::rng::Prng;

/// Davao City barangays covered by the synthetic survey.
const BARANGAYS: [&str; 7] = [
    "Poblacion", "Buhangin", "Paquibato", "Talomo", "Toril", "Agdao", "Matina",
];

/// Emission factor: tons of CO₂ offset per MWh of rooftop solar.
const CO2_TONS_PER_MWH: f64 = 0.7;

/// Numeric sort keys for the explorer list, always descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Area,
    #[default]
    SolarExposure,
    PredictedGhi,
}

/// In-memory collection of synthetic rooftop records. Generated once at
/// startup from a seed; no mutation operations are exposed.
#[derive(Debug)]
pub struct RooftopCatalog {
    records: Vec<RooftopRecord>,
}

impl RooftopCatalog {
    /// Generate `count` records from `seed`. The same seed always yields the
    /// same catalog, so tests can assert exact contents.
    pub fn generate(seed: u64, count: usize) -> Self {
        let mut rng = Prng::new(seed);
        let records = (1..=count)
            .map(|i| RooftopRecord {
                id: format!("RT-{i:04}"),
                barangay: rng.pick(&BARANGAYS).to_string(),
                area: round_to(rng.in_range(80.0, 300.0), 1),
                orientation: *rng.pick(&Orientation::ALL),
                solar_exposure: round_to(rng.in_range(0.5, 1.0), 3),
                predicted_ghi: round_to(rng.in_range(4.0, 7.0), 2),
                lat: 7.07 + rng.next_f64() * 0.3,
                lon: 125.4 + rng.next_f64() * 0.3,
            })
            .collect();
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, id: &str) -> Option<&RooftopRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Case-insensitive substring match against id OR barangay.
    /// An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&RooftopRecord> {
        let needle = term.to_lowercase();
        self.records
            .iter()
            .filter(|r| {
                r.id.to_lowercase().contains(&needle)
                    || r.barangay.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Filter, then sort descending by the requested field.
    pub fn query(&self, term: &str, sort: SortField) -> Vec<&RooftopRecord> {
        let mut matches = self.search(term);
        matches.sort_by(|a, b| {
            sort_key(b, sort)
                .partial_cmp(&sort_key(a, sort))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches
    }
}

fn sort_key(record: &RooftopRecord, field: SortField) -> f64 {
    match field {
        SortField::Area => record.area,
        SortField::SolarExposure => record.solar_exposure,
        SortField::PredictedGhi => record.predicted_ghi,
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Yearly output projected from a record's predicted GHI and area.
/// energy = ghi · area · 365 / 1000 (MWh), CO₂ offset at the fixed factor.
pub fn annual_projection(record: &RooftopRecord) -> AnnualProjection {
    let energy_mwh = record.predicted_ghi * record.area * 365.0 / 1000.0;
    AnnualProjection {
        energy_mwh,
        co2_tons: energy_mwh * CO2_TONS_PER_MWH,
    }
}
