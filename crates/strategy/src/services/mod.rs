pub mod rules;
pub mod signal_model;
pub mod sizing;
