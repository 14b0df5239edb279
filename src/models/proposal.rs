use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ─── Proposal input ──────────────────────────────────────────────────────────

/// Raw customer/site parameters collected by the proposal form.
///
/// Numeric fields accept either JSON numbers or decimal strings as typed by
/// sales staff ("1.234,56" or "1234.56") — see [`parse_decimal`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProposalInput {
    pub client_name: String,
    /// Average billed consumption (kWh/month)
    #[serde(deserialize_with = "flexible_f64")]
    pub monthly_consumption_kwh: f64,
    /// Site irradiation (kWh/m²/day)
    #[serde(deserialize_with = "flexible_f64")]
    pub local_irradiation_kwh_m2_day: f64,
    /// Overall system efficiency / performance ratio (%)
    #[serde(deserialize_with = "flexible_f64")]
    pub system_efficiency_percent: f64,
    /// Rated power per panel (Wp)
    #[serde(deserialize_with = "flexible_f64")]
    pub panel_power_wp: f64,
    /// Energy tariff (currency/kWh)
    #[serde(deserialize_with = "flexible_f64")]
    pub energy_tariff: f64,
    /// Turn-key system price (currency)
    #[serde(deserialize_with = "flexible_f64")]
    pub system_price: f64,
    /// Credit value for exported surplus (currency/kWh)
    #[serde(default, deserialize_with = "flexible_f64")]
    pub excess_price: f64,
    /// Estimated monthly surplus generation (kWh/month)
    #[serde(default, deserialize_with = "flexible_f64")]
    pub excess_estimate_kwh: f64,
}

// ─── Proposal result ─────────────────────────────────────────────────────────

/// Sizing and ROI estimate derived from a [`ProposalInput`].
///
/// Pure value object: full f64 precision, no formatting. Rounding to 1–2
/// decimals happens only at the presentation layer (JSON client / PDF).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProposalResult {
    /// Required array capacity (kWp)
    pub system_power_kwp: f64,
    /// Panel count, rounded up
    pub number_of_panels: u32,
    /// Recommended inverter band, lower bound (kW)
    pub inverter_min_kw: f64,
    /// Recommended inverter band, upper bound (kW)
    pub inverter_max_kw: f64,
    pub monthly_savings: f64,
    pub annual_savings: f64,
    pub payback_years: f64,
    /// Avoided emissions (tons CO₂/year)
    pub co2_reduction_tons_year: f64,
    /// Annual revenue from exported surplus
    pub excess_annual_profit: f64,
}

/// A computed proposal kept in the back-office store.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProposalRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub input: ProposalInput,
    pub result: ProposalResult,
}

// ─── REST API response types ─────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub proposals_stored: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SystemInfo {
    pub api_port: u16,
    pub calculation: crate::config::CalculationConfig,
    pub company: crate::config::CompanyConfig,
}

/// Suggested irradiation value for the proposal form.
#[derive(Debug, Serialize, ToSchema)]
pub struct IrradiationEstimate {
    pub latitude: f64,
    pub longitude: f64,
    /// Daily average global horizontal irradiation (kWh/m²/day)
    pub kwh_m2_day: f64,
    /// "open-meteo" when measured data was available, "climatology" otherwise
    pub source: String,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct IrradiationQuery {
    pub latitude: f64,
    pub longitude: f64,
}

// ─── Open-Meteo wire types ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DailyRadiationResponse {
    pub daily: DailyRadiation,
}

#[derive(Debug, Deserialize)]
pub struct DailyRadiation {
    /// Daily shortwave radiation sums (MJ/m²), null for days without data
    pub shortwave_radiation_sum: Vec<Option<f64>>,
}

// ─── Flexible decimal parsing ────────────────────────────────────────────────

/// Parses a decimal string as typed in the form: plain f64 syntax, or the
/// pt-BR convention with '.' thousands separators and ',' decimal separator.
pub fn parse_decimal(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let normalized = if s.contains(',') {
        s.replace('.', "").replace(',', ".")
    } else {
        s.to_string()
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn flexible_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(f64),
        Str(String),
    }

    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(v) if v.is_finite() => Ok(v),
        NumOrStr::Num(_) => Err(serde::de::Error::custom("number must be finite")),
        NumOrStr::Str(s) => parse_decimal(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid decimal value: {:?}", s))),
    }
}
