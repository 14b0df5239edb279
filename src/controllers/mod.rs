pub mod proposal_controller;
