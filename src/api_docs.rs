use crate::config;
use crate::controllers::proposal_controller;
use crate::models::proposal;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        proposal_controller::create_proposal,
        proposal_controller::list_proposals,
        proposal_controller::get_proposal,
        proposal_controller::delete_proposal,
        proposal_controller::get_proposal_pdf,
        proposal_controller::get_irradiation,
        proposal_controller::get_system_info,
        proposal_controller::get_health
    ),
    components(
        schemas(
            proposal::ProposalInput,
            proposal::ProposalResult,
            proposal::ProposalRecord,
            proposal::IrradiationEstimate,
            proposal::HealthStatus,
            proposal::SystemInfo,
            config::CalculationConfig,
            config::CompanyConfig
        )
    ),
    tags(
        (name = "solar-proposal", description = "Solar Commercial Proposal API")
    )
)]
pub struct ApiDoc;
