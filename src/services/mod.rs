pub mod irradiation;
pub mod number_to_words;
pub mod pdf_service;
pub mod proposal_engine;
