/// ============================================================
///  Site Irradiation Estimator
///
///  Suggests a `local_irradiation` value (kWh/m²/day) for the
///  proposal form from site coordinates.
///
///  Primary source: Open-Meteo measured daily shortwave radiation,
///  averaged over the recent past. When the API is unreachable the
///  estimator falls back to a pure climatological model:
///   1. Solar geometry – declination, eccentricity-corrected solar
///      constant, sunset hour angle
///   2. Daily extraterrestrial irradiation on the horizontal plane
///   3. Latitude-band / seasonal clearness index
///   4. Annual mean over twelve mid-month days
/// ============================================================

use chrono::{Datelike, NaiveDate, Utc};
use std::f64::consts::PI;

use crate::models::proposal::{DailyRadiationResponse, IrradiationEstimate};

// ─── Physical constants ──────────────────────────────────────
const SC: f64 = 1361.0; // Solar constant W/m²
const DEG: f64 = PI / 180.0;

/// Fetches the site estimate, preferring measured data.
pub async fn get_estimate(lat_deg: f64, lon_deg: f64) -> IrradiationEstimate {
    match fetch_measured_average(lat_deg, lon_deg).await {
        Ok(kwh_m2_day) => IrradiationEstimate {
            latitude: lat_deg,
            longitude: lon_deg,
            kwh_m2_day,
            source: "open-meteo".to_string(),
        },
        Err(e) => {
            eprintln!("[IRRADIATION] Open-Meteo unavailable ({}), using climatology", e);
            IrradiationEstimate {
                latitude: lat_deg,
                longitude: lon_deg,
                kwh_m2_day: annual_mean_daily_irradiation(lat_deg, Utc::now().year()),
                source: "climatology".to_string(),
            }
        }
    }
}

/// Average of the last ~90 days of measured daily shortwave radiation.
async fn fetch_measured_average(lat: f64, lon: f64) -> Result<f64, String> {
    let url = format!(
        "https://api.open-meteo.com/v1/forecast?latitude={}&longitude={}&daily=shortwave_radiation_sum&past_days=92&forecast_days=1",
        lat, lon
    );

    let response = reqwest::get(&url).await.map_err(|e| e.to_string())?;
    let resp = response
        .json::<DailyRadiationResponse>()
        .await
        .map_err(|e| e.to_string())?;

    // Open-Meteo reports MJ/m²; 1 kWh = 3.6 MJ
    let sums: Vec<f64> = resp
        .daily
        .shortwave_radiation_sum
        .into_iter()
        .flatten()
        .collect();
    if sums.is_empty() {
        return Err("no radiation data in response".to_string());
    }
    Ok(sums.iter().sum::<f64>() / sums.len() as f64 / 3.6)
}

/// Annual mean daily global irradiation (kWh/m²/day) for a latitude,
/// averaged over the 15th of each month. Pure and deterministic.
pub fn annual_mean_daily_irradiation(lat_deg: f64, year: i32) -> f64 {
    let mut total = 0.0;
    for month in 1..=12 {
        // 15th always exists
        let date = NaiveDate::from_ymd_opt(year, month, 15).unwrap();
        total += daily_irradiation(lat_deg, date.ordinal() as f64);
    }
    total / 12.0
}

/// Daily global horizontal irradiation (kWh/m²/day) for one day of year.
pub fn daily_irradiation(lat_deg: f64, doy: f64) -> f64 {
    let h0 = extraterrestrial_daily(lat_deg, doy);
    h0 * clearness_index(lat_deg, doy)
}

/// Daily extraterrestrial irradiation on the horizontal plane (kWh/m²/day).
///
/// H₀ = (24/π) · Gsc · E₀ · (cos φ cos δ sin ωs + ωs sin φ sin δ)
fn extraterrestrial_daily(lat_deg: f64, doy: f64) -> f64 {
    let b = 2.0 * PI * (doy - 1.0) / 365.0;

    // Declination (Spencer 1971)
    let decl = 0.006918
        - 0.399912 * b.cos()
        + 0.070257 * b.sin()
        - 0.006758 * (2.0 * b).cos()
        + 0.000907 * (2.0 * b).sin()
        - 0.002697 * (3.0 * b).cos()
        + 0.00148 * (3.0 * b).sin();

    // Eccentricity correction
    let e0 = 1.00011
        + 0.034221 * b.cos()
        + 0.00128 * b.sin()
        + 0.000719 * (2.0 * b).cos()
        + 0.000077 * (2.0 * b).sin();

    let lat = lat_deg * DEG;

    // Sunset hour angle; cos ωs outside [-1, 1] means polar night / midnight sun
    let cos_ws = -lat.tan() * decl.tan();
    let ws = if cos_ws >= 1.0 {
        return 0.0; // sun never rises
    } else if cos_ws <= -1.0 {
        PI // sun never sets
    } else {
        cos_ws.acos()
    };

    let h0_wh = (24.0 / PI)
        * SC
        * e0
        * (lat.cos() * decl.cos() * ws.sin() + ws * lat.sin() * decl.sin());
    (h0_wh / 1000.0).max(0.0)
}

/// Clearness index Kt = H / H₀ by latitude band and season.
///
/// Same banding as typical climate zones: tropics are hazy/humid, the
/// subtropical desert belt is clearest, mid and high latitudes trend down.
/// Seasonal phase follows the hemisphere (NH clearest near day 180).
fn clearness_index(lat_deg: f64, doy: f64) -> f64 {
    let season_phase = if lat_deg >= 0.0 {
        (2.0 * PI * (doy - 180.0) / 365.0).cos()
    } else {
        (2.0 * PI * (doy - 365.0) / 365.0).cos()
    };

    let abs_lat = lat_deg.abs();
    let kt = if abs_lat < 15.0 {
        0.48 + 0.03 * season_phase
    } else if abs_lat < 35.0 {
        0.58 + 0.05 * season_phase
    } else if abs_lat < 55.0 {
        0.48 + 0.08 * season_phase
    } else if abs_lat < 65.0 {
        0.42 + 0.06 * season_phase
    } else {
        0.38 + 0.05 * season_phase
    };
    kt.clamp(0.25, 0.75)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equator_equinox_is_high() {
        // Day 80 ≈ March equinox: H₀ ≈ 10.4 kWh/m²/day at the equator
        let h0 = extraterrestrial_daily(0.0, 80.0);
        assert!(h0 > 9.5 && h0 < 11.0, "H0 at equator equinox was {:.2}", h0);
    }

    #[test]
    fn polar_night_yields_zero() {
        // Tromsø latitude in late December
        assert_eq!(extraterrestrial_daily(69.6, 355.0), 0.0);
    }

    #[test]
    fn midnight_sun_is_finite_and_positive() {
        // Same latitude at summer solstice: 24 h daylight
        let h0 = extraterrestrial_daily(69.6, 172.0);
        assert!(h0 > 8.0 && h0 < 13.0, "H0 under midnight sun was {:.2}", h0);
    }

    #[test]
    fn subtropics_beat_high_latitudes_on_annual_mean() {
        let sao_paulo = annual_mean_daily_irradiation(-23.5, 2025);
        let stockholm = annual_mean_daily_irradiation(59.3, 2025);
        assert!(sao_paulo > stockholm);
        // Plausible physical range for Brazil: 4–6.5 kWh/m²/day
        assert!(
            sao_paulo > 4.0 && sao_paulo < 6.5,
            "São Paulo annual mean was {:.2}",
            sao_paulo
        );
    }

    #[test]
    fn annual_mean_is_deterministic() {
        let a = annual_mean_daily_irradiation(45.07, 2025);
        let b = annual_mean_daily_irradiation(45.07, 2025);
        assert_eq!(a, b);
    }

    #[test]
    fn clearness_index_stays_physical() {
        for lat in [-80.0, -40.0, -10.0, 0.0, 20.0, 50.0, 75.0] {
            for doy in [1.0, 90.0, 180.0, 270.0, 365.0] {
                let kt = clearness_index(lat, doy);
                assert!((0.25..=0.75).contains(&kt));
            }
        }
    }
}
