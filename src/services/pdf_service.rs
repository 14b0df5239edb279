/// Commercial proposal PDF layout.
///
/// Single A4 page of fixed-position text blocks: company header, client and
/// date, technical inputs, sizing results, financial results, environmental
/// impact and the investment price written out in words. Layout is cosmetic;
/// nothing downstream parses these documents.

use chrono::{DateTime, Utc};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::io::BufWriter;
use thiserror::Error;

use crate::config::CompanyConfig;
use crate::models::proposal::ProposalRecord;
use crate::services::number_to_words::currency_in_words;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("pdf generation failed: {0}")]
    Render(String),
}

const PAGE_W_MM: f32 = 210.0;
const PAGE_H_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;

/// Renders one stored proposal as PDF bytes.
pub fn render(record: &ProposalRecord, company: &CompanyConfig) -> Result<Vec<u8>, PdfError> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Proposta - {}", record.input.client_name),
        Mm(PAGE_W_MM),
        Mm(PAGE_H_MM),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PdfError::Render(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| PdfError::Render(e.to_string()))?;
    let layer = doc.get_page(page).get_layer(layer);

    let x = MARGIN_MM;
    let input = &record.input;
    let result = &record.result;

    // ── Header ──────────────────────────────────────────────────────────────
    layer.use_text(company.name.clone(), 16.0, Mm(x), Mm(277.0), &bold);
    let contact = [company.phone.as_str(), company.email.as_str()]
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("  |  ");
    if !contact.is_empty() {
        layer.use_text(contact, 9.0, Mm(x), Mm(271.0), &font);
    }
    layer.use_text(
        "PROPOSTA COMERCIAL - SISTEMA FOTOVOLTAICO",
        13.0,
        Mm(x),
        Mm(258.0),
        &bold,
    );

    // ── Client / date ───────────────────────────────────────────────────────
    layer.use_text(
        format!("Cliente: {}", input.client_name),
        11.0,
        Mm(x),
        Mm(246.0),
        &font,
    );
    layer.use_text(
        format!("Data: {}", record.created_at.format("%d/%m/%Y")),
        11.0,
        Mm(x),
        Mm(240.0),
        &font,
    );

    // ── Technical inputs ────────────────────────────────────────────────────
    layer.use_text("DADOS TECNICOS", 12.0, Mm(x), Mm(226.0), &bold);
    let technical = [
        format!("Consumo mensal: {} kWh", fmt_num(input.monthly_consumption_kwh, 0)),
        format!(
            "Irradiacao local: {} kWh/m2/dia",
            fmt_num(input.local_irradiation_kwh_m2_day, 2)
        ),
        format!("Eficiencia do sistema: {}%", fmt_num(input.system_efficiency_percent, 0)),
        format!("Potencia do painel: {} Wp", fmt_num(input.panel_power_wp, 0)),
        format!("Tarifa de energia: {}/kWh", fmt_brl(input.energy_tariff)),
    ];
    write_block(&layer, &font, x, 219.0, &technical);

    // ── Sizing results ──────────────────────────────────────────────────────
    layer.use_text("DIMENSIONAMENTO", 12.0, Mm(x), Mm(182.0), &bold);
    let sizing = [
        format!("Potencia do sistema: {} kWp", fmt_num(result.system_power_kwp, 2)),
        format!("Numero de paineis: {}", result.number_of_panels),
        format!(
            "Inversor recomendado: {} a {} kW",
            fmt_num(result.inverter_min_kw, 1),
            fmt_num(result.inverter_max_kw, 1)
        ),
    ];
    write_block(&layer, &font, x, 175.0, &sizing);

    // ── Financial results ───────────────────────────────────────────────────
    layer.use_text("RETORNO FINANCEIRO", 12.0, Mm(x), Mm(150.0), &bold);
    let financial = [
        format!("Economia mensal: {}", fmt_brl(result.monthly_savings)),
        format!("Economia anual: {}", fmt_brl(result.annual_savings)),
        format!("Payback estimado: {} anos", fmt_num(result.payback_years, 1)),
        format!(
            "Receita anual de excedente: {}",
            fmt_brl(result.excess_annual_profit)
        ),
    ];
    write_block(&layer, &font, x, 143.0, &financial);

    // ── Environmental impact ────────────────────────────────────────────────
    layer.use_text("IMPACTO AMBIENTAL", 12.0, Mm(x), Mm(112.0), &bold);
    write_block(
        &layer,
        &font,
        x,
        105.0,
        &[format!(
            "Reducao de CO2: {} toneladas/ano",
            fmt_num(result.co2_reduction_tons_year, 3)
        )],
    );

    // ── Investment ──────────────────────────────────────────────────────────
    layer.use_text("INVESTIMENTO", 12.0, Mm(x), Mm(88.0), &bold);
    layer.use_text(
        format!("Valor total: {}", fmt_brl(input.system_price)),
        11.0,
        Mm(x),
        Mm(81.0),
        &font,
    );
    layer.use_text(
        format!("({})", currency_in_words(input.system_price)),
        9.0,
        Mm(x),
        Mm(75.0),
        &font,
    );

    // ── Footer ──────────────────────────────────────────────────────────────
    layer.use_text(
        format!(
            "{} - proposta gerada em {}",
            company.name,
            record.created_at.format("%d/%m/%Y %H:%M UTC")
        ),
        8.0,
        Mm(x),
        Mm(15.0),
        &font,
    );

    let mut bytes: Vec<u8> = Vec::new();
    {
        let mut writer = BufWriter::new(&mut bytes);
        doc.save(&mut writer)
            .map_err(|e| PdfError::Render(e.to_string()))?;
    }
    Ok(bytes)
}

/// Download filename: `Proposta_<client>_<YYYY-MM-DD>.pdf`, client name
/// reduced to filename-safe ASCII.
pub fn filename(client_name: &str, date: DateTime<Utc>) -> String {
    let mut safe: String = client_name
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                Some(c)
            } else if c == ' ' {
                Some('_')
            } else {
                None
            }
        })
        .collect();
    if safe.is_empty() {
        safe = "Cliente".to_string();
    }
    format!("Proposta_{}_{}.pdf", safe, date.format("%Y-%m-%d"))
}

fn write_block(
    layer: &printpdf::PdfLayerReference,
    font: &printpdf::IndirectFontRef,
    x: f32,
    top_y: f32,
    lines: &[String],
) {
    for (i, line) in lines.iter().enumerate() {
        layer.use_text(line.clone(), 10.0, Mm(x), Mm(top_y - i as f32 * 6.0), font);
    }
}

/// "R$ 35.000,00" — pt-BR grouping, always two decimals.
fn fmt_brl(value: f64) -> String {
    format!("R$ {}", fmt_num(value, 2))
}

/// Fixed-precision pt-BR number: '.' thousands separator, ',' decimal.
fn fmt_num(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(d) => ("-", d),
        None => ("", int_part),
    };
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(f) => format!("{}{},{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CalculationConfig, CompanyConfig};
    use crate::models::proposal::ProposalInput;
    use crate::services::proposal_engine;
    use uuid::Uuid;

    fn sample_record() -> ProposalRecord {
        let input = ProposalInput {
            client_name: "Maria Souza".to_string(),
            monthly_consumption_kwh: 1500.0,
            local_irradiation_kwh_m2_day: 5.0,
            system_efficiency_percent: 80.0,
            panel_power_wp: 550.0,
            energy_tariff: 0.85,
            system_price: 35000.0,
            excess_price: 0.40,
            excess_estimate_kwh: 120.0,
        };
        let result = proposal_engine::compute(&input, &CalculationConfig::default()).unwrap();
        ProposalRecord {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            input,
            result,
        }
    }

    #[test]
    fn render_produces_a_pdf() {
        let bytes = render(&sample_record(), &CompanyConfig::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"), "missing PDF magic");
        assert!(bytes.len() > 500);
    }

    #[test]
    fn filename_is_sanitized() {
        let date = "2026-08-28T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(
            filename("Maria Souza", date),
            "Proposta_Maria_Souza_2026-08-28.pdf"
        );
        assert_eq!(filename("A/B: C", date), "Proposta_AB_C_2026-08-28.pdf");
        assert_eq!(filename("!!!", date), "Proposta_Cliente_2026-08-28.pdf");
    }

    #[test]
    fn brl_formatting() {
        assert_eq!(fmt_brl(35000.0), "R$ 35.000,00");
        assert_eq!(fmt_brl(0.85), "R$ 0,85");
        assert_eq!(fmt_num(1234567.891, 2), "1.234.567,89");
        assert_eq!(fmt_num(12.5, 2), "12,50");
        assert_eq!(fmt_num(-1500.0, 0), "-1.500");
    }
}
