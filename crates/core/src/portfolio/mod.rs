//! Portfolio module - metrics derived from the coin collection.

pub mod summary;

pub use summary::{
    calculate_summary, roi_contribution, Bucket, PortfolioService, PortfolioServiceTrait,
    PortfolioSummary, RoiContribution,
};
