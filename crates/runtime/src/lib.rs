//! Process wiring for Coinfolio: environment configuration, tracing setup
//! and construction of the coin and portfolio services for one backend.

pub mod config;
pub mod logging;
pub mod state;

pub use config::{Backend, Config, LogFormat};
pub use logging::init_tracing;
pub use state::{build_state, AppState};
