use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_days_per_month() -> f64 { 30.0 }
fn default_co2_factor() -> f64 { 0.084 }
fn default_inverter_band_min() -> f64 { 0.8 }
fn default_inverter_band_max() -> f64 { 1.2 }

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub calculation: CalculationConfig,
    #[serde(default)]
    pub company: CompanyConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Heuristic constants of the sizing/ROI formulas.
///
/// Defaults match the values used in the field (30-day month, 0.084 kg CO₂/kWh
/// grid emissions factor, ±20% inverter sizing band). Overridable from
/// config.json, but must not be changed without domain sign-off.
#[derive(Debug, Deserialize, Serialize, Clone, ToSchema)]
pub struct CalculationConfig {
    #[serde(default = "default_days_per_month")]
    pub days_per_month: f64,
    /// Grid emissions factor (kg CO₂ per kWh)
    #[serde(default = "default_co2_factor")]
    pub co2_factor_kg_per_kwh: f64,
    /// Inverter sizing band lower bound, fraction of system kWp
    #[serde(default = "default_inverter_band_min")]
    pub inverter_band_min: f64,
    /// Inverter sizing band upper bound, fraction of system kWp
    #[serde(default = "default_inverter_band_max")]
    pub inverter_band_max: f64,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            days_per_month: default_days_per_month(),
            co2_factor_kg_per_kwh: default_co2_factor(),
            inverter_band_min: default_inverter_band_min(),
            inverter_band_max: default_inverter_band_max(),
        }
    }
}

/// Company identity printed on the PDF header/footer.
#[derive(Debug, Deserialize, Serialize, Clone, ToSchema)]
pub struct CompanyConfig {
    #[serde(default = "CompanyConfig::default_name")]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl CompanyConfig {
    fn default_name() -> String {
        "Energia Solar".to_string()
    }
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            phone: String::new(),
            email: String::new(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}
