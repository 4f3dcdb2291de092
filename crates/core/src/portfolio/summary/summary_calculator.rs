use log::warn;
use rust_decimal::Decimal;

use super::summary_model::{Bucket, PortfolioSummary, RoiContribution};
use crate::coins::Coin;

/// Returns the ROI contribution of a single coin.
///
/// Held coins contribute their stored `roi` weighted by current value. Sold
/// coins contribute their realised ROI, `(sold - purchase) / purchase * 100`,
/// weighted by purchase price; a zero purchase price yields zero weight.
/// A coin flagged as sold without a sold price belongs to neither bucket,
/// and so does a sold coin whose realised ROI does not fit in a `Decimal`.
pub fn roi_contribution(coin: &Coin) -> Option<RoiContribution> {
    if !coin.is_sold {
        return Some(RoiContribution {
            bucket: Bucket::Active,
            roi: coin.roi,
            weight: coin.current_value,
        });
    }

    let sold_price = coin.sold_price?;
    let roi = if coin.purchase_price.is_zero() {
        Decimal::ZERO
    } else {
        sold_price
            .checked_sub(coin.purchase_price)
            .and_then(|gain| gain.checked_div(coin.purchase_price))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))?
    };
    Some(RoiContribution {
        bucket: Bucket::Sold { sold_price },
        roi,
        weight: coin.purchase_price,
    })
}

/// Running sums of the summary. Every update is checked, so a coin is
/// either added in full or not at all.
#[derive(Clone, Copy)]
struct Totals {
    total_value: Decimal,
    active_value: Decimal,
    active_weighted_roi: Decimal,
    active_cost_basis: Decimal,
    active_count: usize,
    sold_cost_basis: Decimal,
    sold_weighted_roi: Decimal,
    sold_profit: Decimal,
    sold_proceeds: Decimal,
    sold_count: usize,
}

impl Totals {
    fn new(cash_reserve: Decimal) -> Self {
        Self {
            total_value: cash_reserve,
            active_value: Decimal::ZERO,
            active_weighted_roi: Decimal::ZERO,
            active_cost_basis: Decimal::ZERO,
            active_count: 0,
            sold_cost_basis: Decimal::ZERO,
            sold_weighted_roi: Decimal::ZERO,
            sold_profit: Decimal::ZERO,
            sold_proceeds: Decimal::ZERO,
            sold_count: 0,
        }
    }

    fn with(self, coin: &Coin, contribution: RoiContribution) -> Option<Self> {
        let weighted_roi = contribution.roi.checked_mul(contribution.weight)?;
        match contribution.bucket {
            Bucket::Active => Some(Self {
                total_value: self.total_value.checked_add(coin.current_value)?,
                active_value: self.active_value.checked_add(coin.current_value)?,
                active_weighted_roi: self.active_weighted_roi.checked_add(weighted_roi)?,
                active_cost_basis: self.active_cost_basis.checked_add(coin.purchase_price)?,
                active_count: self.active_count + 1,
                ..self
            }),
            Bucket::Sold { sold_price } => {
                let profit = sold_price.checked_sub(coin.purchase_price)?;
                Some(Self {
                    total_value: self.total_value.checked_add(profit)?,
                    sold_cost_basis: self.sold_cost_basis.checked_add(coin.purchase_price)?,
                    sold_weighted_roi: self.sold_weighted_roi.checked_add(weighted_roi)?,
                    sold_profit: self.sold_profit.checked_add(profit)?,
                    sold_proceeds: self.sold_proceeds.checked_add(sold_price)?,
                    sold_count: self.sold_count + 1,
                    ..self
                })
            }
        }
    }
}

/// Weighted average `weighted_sum / total_weight`, zero when the weight is
/// zero or the quotient does not fit in a `Decimal`.
fn weighted_average(weighted_sum: Decimal, total_weight: Decimal) -> Decimal {
    if total_weight.is_zero() {
        return Decimal::ZERO;
    }
    weighted_sum.checked_div(total_weight).unwrap_or_else(|| {
        warn!(
            "Weighted average {} / {} overflows, reporting zero",
            weighted_sum, total_weight
        );
        Decimal::ZERO
    })
}

/// Computes the portfolio summary for `coins` and a cash reserve.
///
/// Pure: nothing is cached between calls. Never panics: a coin whose
/// amounts would overflow the running sums is left out and logged.
pub fn calculate_summary(coins: &[Coin], cash_reserve: Decimal) -> PortfolioSummary {
    let mut totals = Totals::new(cash_reserve);

    for coin in coins {
        let Some(contribution) = roi_contribution(coin) else {
            if coin.sold_price.is_some() {
                warn!("Realised ROI of coin {} overflows, skipping it", coin.id);
            }
            continue;
        };
        match totals.with(coin, contribution) {
            Some(next) => totals = next,
            None => warn!("Coin {} overflows the portfolio summary, skipping it", coin.id),
        }
    }

    let active_roi = weighted_average(totals.active_weighted_roi, totals.active_value);
    let sold_roi = weighted_average(totals.sold_weighted_roi, totals.sold_cost_basis);
    let total_roi = active_roi
        .checked_mul(totals.active_value)
        .zip(sold_roi.checked_mul(totals.sold_cost_basis))
        .and_then(|(active, sold)| active.checked_add(sold))
        .zip(totals.active_value.checked_add(totals.sold_cost_basis))
        .map(|(weighted_sum, total_weight)| weighted_average(weighted_sum, total_weight))
        .unwrap_or_else(|| {
            warn!("Total ROI overflows, reporting zero");
            Decimal::ZERO
        });

    PortfolioSummary {
        cash_reserve,
        active_value: totals.active_value,
        sold_profit: totals.sold_profit,
        total_value: totals.total_value,
        active_roi,
        sold_roi,
        total_roi,
        active_count: totals.active_count,
        sold_count: totals.sold_count,
        active_cost_basis: totals.active_cost_basis,
        sold_proceeds: totals.sold_proceeds,
    }
}
