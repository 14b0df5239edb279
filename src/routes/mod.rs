pub mod proposal_routes;
