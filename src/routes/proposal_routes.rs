use axum::{
    Router,
    routing::{get, post},
};

use crate::controllers::proposal_controller::{
    // Proposals
    create_proposal, delete_proposal, get_proposal, get_proposal_pdf, list_proposals,
    // Irradiation & system
    get_health, get_irradiation, get_system_info,
};
use crate::shared_state::SharedState;

/// Build the `/api/*` sub-router.
/// Handlers extract `State<AppState>` and/or `State<Config>` via
/// `FromRef<SharedState>` — a single `.with_state(shared)` covers both.
pub fn api_routes(shared: SharedState) -> Router {
    Router::new()
        .route("/proposals", post(create_proposal).get(list_proposals))
        .route("/proposals/{id}", get(get_proposal).delete(delete_proposal))
        .route("/proposals/{id}/pdf", get(get_proposal_pdf))
        .route("/irradiation", get(get_irradiation))
        .route("/system/config", get(get_system_info))
        .route("/health", get(get_health))
        .with_state(shared)
}
