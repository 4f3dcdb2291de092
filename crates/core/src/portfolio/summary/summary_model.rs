//! Portfolio summary domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Portfolio-level metrics derived from the coin collection and cash reserve.
///
/// Never persisted: it is recomputed whenever the collection or the cash
/// reserve changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Cash held outside the collection
    pub cash_reserve: Decimal,
    /// Sum of current values of held coins
    pub active_value: Decimal,
    /// Sum of `sold_price - purchase_price` over sold coins
    pub sold_profit: Decimal,
    /// `cash_reserve + active_value + sold_profit`
    pub total_value: Decimal,
    /// ROI of held coins, weighted by current value
    pub active_roi: Decimal,
    /// Realised ROI of sold coins, weighted by purchase price
    pub sold_roi: Decimal,
    /// Active and sold ROI combined, weighted by their bucket totals
    pub total_roi: Decimal,
    pub active_count: usize,
    pub sold_count: usize,
    /// Sum of purchase prices of held coins
    pub active_cost_basis: Decimal,
    /// Sum of sold prices of sold coins
    pub sold_proceeds: Decimal,
}

/// Which side of the portfolio a coin counts towards. Sold coins carry the
/// price they were sold at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Active,
    Sold { sold_price: Decimal },
}

/// A single coin's ROI and the weight it carries in the weighted averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoiContribution {
    pub bucket: Bucket,
    /// ROI in percent
    pub roi: Decimal,
    /// Current value for held coins, purchase price for sold coins
    pub weight: Decimal,
}
