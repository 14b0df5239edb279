use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use crate::config::Config;
use crate::models::proposal::{
    HealthStatus, IrradiationEstimate, IrradiationQuery, ProposalInput, ProposalRecord, SystemInfo,
};
use crate::services::{irradiation, pdf_service, proposal_engine};
use crate::shared_state::AppState;

/// POST /api/proposals
/// Compute and store a new proposal
///
/// Validates the form input, runs the sizing/ROI calculation and stores the
/// result in the back-office list. Invalid numeric input (zero/negative
/// divisor fields, zero savings) is rejected — a proposal never carries
/// NaN or infinity.
#[utoipa::path(
    post,
    path = "/api/proposals",
    request_body = ProposalInput,
    responses(
        (status = 201, description = "Proposal computed and stored", body = ProposalRecord),
        (status = 400, description = "Invalid input"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_proposal(
    State(state): State<AppState>,
    State(config): State<Config>,
    Json(input): Json<ProposalInput>,
) -> impl IntoResponse {
    match proposal_engine::compute(&input, &config.calculation) {
        Ok(result) => {
            let record = ProposalRecord {
                id: Uuid::new_v4(),
                created_at: Utc::now(),
                input,
                result,
            };
            println!(
                "[PROPOSAL] Created {} | Client: {} | {:.2} kWp | {} panels",
                record.id,
                record.input.client_name,
                record.result.system_power_kwp,
                record.result.number_of_panels
            );
            state.insert(record.clone());
            (StatusCode::CREATED, Json(record)).into_response()
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

/// GET /api/proposals
/// List stored proposals, newest first
#[utoipa::path(
    get,
    path = "/api/proposals",
    responses(
        (status = 200, description = "Stored proposals", body = Vec<ProposalRecord>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_proposals(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.list()).into_response()
}

/// GET /api/proposals/{id}
/// Fetch one stored proposal
#[utoipa::path(
    get,
    path = "/api/proposals/{id}",
    params(("id" = Uuid, Path, description = "Proposal ID")),
    responses(
        (status = 200, description = "Stored proposal", body = ProposalRecord),
        (status = 404, description = "Proposal not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_proposal(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    match state.get(&id) {
        Some(record) => Json(record).into_response(),
        None => not_found(),
    }
}

/// DELETE /api/proposals/{id}
/// Remove a stored proposal
#[utoipa::path(
    delete,
    path = "/api/proposals/{id}",
    params(("id" = Uuid, Path, description = "Proposal ID")),
    responses(
        (status = 204, description = "Proposal removed"),
        (status = 404, description = "Proposal not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_proposal(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    if state.remove(&id) {
        println!("[PROPOSAL] Removed {}", id);
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found()
    }
}

/// GET /api/proposals/{id}/pdf
/// Download the proposal as PDF
///
/// Renders the stored proposal as a single-page A4 document, served as a
/// file download named `Proposta_<client>_<date>.pdf`.
#[utoipa::path(
    get,
    path = "/api/proposals/{id}/pdf",
    params(("id" = Uuid, Path, description = "Proposal ID")),
    responses(
        (status = 200, description = "PDF document", body = Vec<u8>, content_type = "application/pdf"),
        (status = 404, description = "Proposal not found"),
        (status = 500, description = "PDF generation failed")
    )
)]
pub async fn get_proposal_pdf(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    State(config): State<Config>,
) -> impl IntoResponse {
    let Some(record) = state.get(&id) else {
        return not_found();
    };
    match pdf_service::render(&record, &config.company) {
        Ok(bytes) => {
            let filename = pdf_service::filename(&record.input.client_name, record.created_at);
            println!("[PDF] Exported {} ({} bytes)", filename, bytes.len());
            (
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", filename),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            eprintln!("[PDF] Generation failed for {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}

/// GET /api/irradiation
/// Suggest a site irradiation value
///
/// Averages recent measured daily radiation from Open-Meteo when reachable,
/// falling back to a deterministic climatological model.
#[utoipa::path(
    get,
    path = "/api/irradiation",
    params(IrradiationQuery),
    responses(
        (status = 200, description = "Suggested irradiation", body = IrradiationEstimate),
        (status = 400, description = "Coordinates out of range"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_irradiation(Query(query): Query<IrradiationQuery>) -> impl IntoResponse {
    if !(-90.0..=90.0).contains(&query.latitude) || !(-180.0..=180.0).contains(&query.longitude) {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "coordinates out of range"})),
        )
            .into_response();
    }
    Json(irradiation::get_estimate(query.latitude, query.longitude).await).into_response()
}

/// GET /api/system/config
/// Effective calculation constants and company identity
#[utoipa::path(
    get,
    path = "/api/system/config",
    responses(
        (status = 200, description = "System configuration", body = SystemInfo),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_system_info(State(config): State<Config>) -> impl IntoResponse {
    Json(SystemInfo {
        api_port: config.server.port,
        calculation: config.calculation,
        company: config.company,
    })
    .into_response()
}

/// GET /api/health
/// Service liveness and store size
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service health", body = HealthStatus),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        proposals_stored: state.count(),
    })
    .into_response()
}

fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"error": "Proposal not found"})),
    )
        .into_response()
}
