/// ============================================================
///  Photovoltaic Sizing & ROI Engine
///
///  Pipeline:
///   1. Required array capacity – consumption vs. average daily
///      generation (days/month × irradiation × efficiency)
///   2. Panel count           – capacity / panel rating, rounded up
///   3. Inverter band         – capacity × [band_min, band_max]
///   4. Savings               – consumption × tariff, monthly/annual
///   5. Payback               – system price / annual savings
///   6. Environmental impact  – grid emissions factor
///   7. Surplus revenue       – exported-energy credits
/// ============================================================

use thiserror::Error;

use crate::config::CalculationConfig;
use crate::models::proposal::{ProposalInput, ProposalResult};

#[derive(Debug, Error, PartialEq)]
pub enum ProposalError {
    #[error("invalid input: {field} {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },
}

impl ProposalError {
    fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::InvalidInput { field, reason }
    }
}

/// Computes the full sizing/ROI estimate for one proposal.
///
/// Pure and deterministic: same input and constants always produce the same
/// result, no side effects. Validation runs before any arithmetic so the
/// result can never carry NaN or infinity.
pub fn compute(
    input: &ProposalInput,
    constants: &CalculationConfig,
) -> Result<ProposalResult, ProposalError> {
    validate(input)?;

    // 1. Required array capacity (kWp)
    let daily_yield_per_kwp =
        constants.days_per_month * input.local_irradiation_kwh_m2_day
            * (input.system_efficiency_percent / 100.0);
    let system_power_kwp = input.monthly_consumption_kwh / daily_yield_per_kwp;

    // 2. Panel count, rounded up to a whole panel
    let panel_kwp = input.panel_power_wp / 1000.0;
    let number_of_panels = (system_power_kwp / panel_kwp).ceil() as u32;

    // 3. Inverter sizing band
    let inverter_min_kw = system_power_kwp * constants.inverter_band_min;
    let inverter_max_kw = system_power_kwp * constants.inverter_band_max;

    // 4. Savings
    let monthly_savings = input.monthly_consumption_kwh * input.energy_tariff;
    let annual_savings = monthly_savings * 12.0;

    // 5. Payback — undefined when the system saves nothing
    if annual_savings <= 0.0 {
        return Err(ProposalError::invalid(
            "energy_tariff",
            "produces zero annual savings, payback is undefined",
        ));
    }
    let payback_years = input.system_price / annual_savings;

    // 6. Avoided emissions (tons CO₂/year)
    let co2_reduction_tons_year =
        input.monthly_consumption_kwh * 12.0 * constants.co2_factor_kg_per_kwh / 1000.0;

    // 7. Surplus revenue
    let excess_annual_profit = input.excess_estimate_kwh * input.excess_price * 12.0;

    Ok(ProposalResult {
        system_power_kwp,
        number_of_panels,
        inverter_min_kw,
        inverter_max_kw,
        monthly_savings,
        annual_savings,
        payback_years,
        co2_reduction_tons_year,
        excess_annual_profit,
    })
}

/// Rejects inputs that would divide by zero or produce negative physical
/// quantities.
fn validate(input: &ProposalInput) -> Result<(), ProposalError> {
    if input.client_name.trim().is_empty() {
        return Err(ProposalError::invalid("client_name", "must not be empty"));
    }
    if !input.monthly_consumption_kwh.is_finite() || input.monthly_consumption_kwh <= 0.0 {
        return Err(ProposalError::invalid(
            "monthly_consumption_kwh",
            "must be greater than zero",
        ));
    }
    if !input.local_irradiation_kwh_m2_day.is_finite() || input.local_irradiation_kwh_m2_day <= 0.0
    {
        return Err(ProposalError::invalid(
            "local_irradiation_kwh_m2_day",
            "must be greater than zero",
        ));
    }
    if !input.system_efficiency_percent.is_finite()
        || input.system_efficiency_percent <= 0.0
        || input.system_efficiency_percent > 100.0
    {
        return Err(ProposalError::invalid(
            "system_efficiency_percent",
            "must be in (0, 100]",
        ));
    }
    if !input.panel_power_wp.is_finite() || input.panel_power_wp <= 0.0 {
        return Err(ProposalError::invalid(
            "panel_power_wp",
            "must be greater than zero",
        ));
    }
    if !input.energy_tariff.is_finite() || input.energy_tariff < 0.0 {
        return Err(ProposalError::invalid(
            "energy_tariff",
            "must not be negative",
        ));
    }
    if !input.system_price.is_finite() || input.system_price < 0.0 {
        return Err(ProposalError::invalid(
            "system_price",
            "must not be negative",
        ));
    }
    if !input.excess_price.is_finite() || input.excess_price < 0.0 {
        return Err(ProposalError::invalid(
            "excess_price",
            "must not be negative",
        ));
    }
    if !input.excess_estimate_kwh.is_finite() || input.excess_estimate_kwh < 0.0 {
        return Err(ProposalError::invalid(
            "excess_estimate_kwh",
            "must not be negative",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_input() -> ProposalInput {
        ProposalInput {
            client_name: "Maria Souza".to_string(),
            monthly_consumption_kwh: 1500.0,
            local_irradiation_kwh_m2_day: 5.0,
            system_efficiency_percent: 80.0,
            panel_power_wp: 550.0,
            energy_tariff: 0.85,
            system_price: 35000.0,
            excess_price: 0.40,
            excess_estimate_kwh: 120.0,
        }
    }

    fn constants() -> CalculationConfig {
        CalculationConfig::default()
    }

    #[test]
    fn system_power_matches_hand_calculation() {
        // 1500 / (30 × 5.0 × 0.80) = 12.5 kWp
        let r = compute(&base_input(), &constants()).unwrap();
        assert!((r.system_power_kwp - 12.5).abs() < 1e-9);
    }

    #[test]
    fn panel_count_rounds_up() {
        // ceil(12.5 / 0.55) = ceil(22.72..) = 23
        let r = compute(&base_input(), &constants()).unwrap();
        assert_eq!(r.number_of_panels, 23);

        // Exact division must not over-count: 12.5 kWp / 500 Wp = 25
        let mut input = base_input();
        input.panel_power_wp = 500.0;
        let r = compute(&input, &constants()).unwrap();
        assert_eq!(r.number_of_panels, 25);
    }

    #[test]
    fn inverter_band_brackets_system_power() {
        let r = compute(&base_input(), &constants()).unwrap();
        assert!((r.inverter_min_kw - 10.0).abs() < 1e-9);
        assert!((r.inverter_max_kw - 15.0).abs() < 1e-9);
    }

    #[test]
    fn savings_and_payback() {
        let r = compute(&base_input(), &constants()).unwrap();
        assert!((r.monthly_savings - 1275.0).abs() < 1e-9);
        assert!((r.annual_savings - 15300.0).abs() < 1e-9);
        assert!((r.annual_savings - 12.0 * r.monthly_savings).abs() < 1e-9);
        assert!((r.payback_years - 35000.0 / 15300.0).abs() < 1e-9);
    }

    #[test]
    fn co2_reduction_uses_emissions_factor() {
        // 1500 × 12 × 0.084 / 1000 = 1.512 t/year
        let r = compute(&base_input(), &constants()).unwrap();
        assert!((r.co2_reduction_tons_year - 1.512).abs() < 1e-9);
    }

    #[test]
    fn excess_profit_is_annualized() {
        let r = compute(&base_input(), &constants()).unwrap();
        assert!((r.excess_annual_profit - 120.0 * 0.40 * 12.0).abs() < 1e-9);
    }

    #[test]
    fn zero_tariff_fails_instead_of_infinite_payback() {
        let mut input = base_input();
        input.energy_tariff = 0.0;
        let err = compute(&input, &constants()).unwrap_err();
        assert!(matches!(err, ProposalError::InvalidInput { .. }));
    }

    #[test]
    fn zero_irradiation_is_rejected_before_division() {
        let mut input = base_input();
        input.local_irradiation_kwh_m2_day = 0.0;
        assert_eq!(
            compute(&input, &constants()).unwrap_err(),
            ProposalError::invalid("local_irradiation_kwh_m2_day", "must be greater than zero")
        );
    }

    #[test]
    fn zero_efficiency_is_rejected_before_division() {
        let mut input = base_input();
        input.system_efficiency_percent = 0.0;
        assert!(compute(&input, &constants()).is_err());
    }

    #[test]
    fn negative_inputs_are_rejected() {
        for field in 0..4 {
            let mut input = base_input();
            match field {
                0 => input.monthly_consumption_kwh = -1.0,
                1 => input.panel_power_wp = -550.0,
                2 => input.system_price = -100.0,
                _ => input.excess_estimate_kwh = -5.0,
            }
            assert!(compute(&input, &constants()).is_err(), "case {}", field);
        }
    }

    #[test]
    fn result_never_contains_non_finite_values() {
        let r = compute(&base_input(), &constants()).unwrap();
        for v in [
            r.system_power_kwp,
            r.inverter_min_kw,
            r.inverter_max_kw,
            r.monthly_savings,
            r.annual_savings,
            r.payback_years,
            r.co2_reduction_tons_year,
            r.excess_annual_profit,
        ] {
            assert!(v.is_finite());
        }
    }

    #[test]
    fn compute_is_deterministic() {
        let a = compute(&base_input(), &constants()).unwrap();
        let b = compute(&base_input(), &constants()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn custom_constants_flow_through() {
        let mut c = constants();
        c.days_per_month = 30.4;
        c.co2_factor_kg_per_kwh = 0.1;
        let r = compute(&base_input(), &c).unwrap();
        assert!((r.system_power_kwp - 1500.0 / (30.4 * 5.0 * 0.8)).abs() < 1e-9);
        assert!((r.co2_reduction_tons_year - 1.8).abs() < 1e-9);
    }
}
