pub mod error;
pub mod indicators;
pub mod services;

pub use error::SignalError;
pub use services::signal_model::{ModelState, SignalModel};
