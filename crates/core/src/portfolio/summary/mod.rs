//! Portfolio summary module.
//!
//! Derives portfolio-level metrics (total value, weighted ROI) from the coin
//! collection and the user's cash reserve, and republishes them whenever the
//! collection changes.

mod summary_calculator;
mod summary_model;
mod summary_service;
mod summary_traits;

pub use summary_calculator::*;
pub use summary_model::*;
pub use summary_service::*;
pub use summary_traits::*;
