use serde::Deserialize;

fn default_delay_ms() -> u64 { 1500 }
fn default_catalog_size() -> usize { 50 }

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub estimator: EstimatorConfig,
    pub catalog: CatalogConfig,
    pub default_location: DefaultLocation,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EstimatorConfig {
    /// Artificial latency before an estimation resolves, in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    pub seed: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub seed: u64,
    #[serde(default = "default_catalog_size")]
    pub size: usize,
}

/// Fallback location applied when device geolocation is unavailable or denied.
#[derive(Debug, Deserialize, Clone)]
pub struct DefaultLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}
