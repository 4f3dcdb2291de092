//! Coin domain models.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_AMOUNT, ROI_DECIMAL_PRECISION};
use crate::errors::ValidationError;
use crate::{Error, Result};

/// Domain model representing a single coin in the collection.
///
/// `id` is assigned by the backend when the coin is created and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub id: String,
    pub name: String,
    /// Reference to the coin's image (URL or storage path)
    #[serde(default)]
    pub image: String,
    pub description: Option<String>,
    pub grade: Option<String>,
    pub mint: Option<String>,
    pub year: Option<i32>,
    pub acquisition_date: NaiveDate,
    pub purchase_price: Decimal,
    pub current_value: Decimal,
    /// Return on investment, in percent
    pub roi: Decimal,
    #[serde(default)]
    pub is_sold: bool,
    pub sold_price: Option<Decimal>,
    pub sold_date: Option<NaiveDate>,
}

/// Input model for adding a coin. It carries no identifier: the backend
/// assigns one when the coin is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCoin {
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub description: Option<String>,
    pub grade: Option<String>,
    pub mint: Option<String>,
    pub year: Option<i32>,
    pub acquisition_date: NaiveDate,
    pub purchase_price: Decimal,
    pub current_value: Decimal,
    /// Derived from purchase price and current value when absent
    pub roi: Option<Decimal>,
    #[serde(default)]
    pub is_sold: bool,
    pub sold_price: Option<Decimal>,
    pub sold_date: Option<NaiveDate>,
}

/// Price and date of a sale, the input of the sell transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetails {
    pub sold_price: Decimal,
    pub sold_date: NaiveDate,
}

/// Computes ROI in percent from a purchase price and a later value.
///
/// Returns zero when the purchase price is zero. Fails when the ratio does
/// not fit in a `Decimal`.
pub fn compute_roi(purchase_price: Decimal, value: Decimal) -> Result<Decimal> {
    if purchase_price.is_zero() {
        return Ok(Decimal::ZERO);
    }
    (value - purchase_price)
        .checked_div(purchase_price)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|roi| {
            roi.round_dp_with_strategy(
                ROI_DECIMAL_PRECISION,
                RoundingStrategy::MidpointAwayFromZero,
            )
        })
        .ok_or_else(|| {
            Error::Validation(ValidationError::AmountOutOfRange {
                field: "roi".to_string(),
                value: format!("({} - {}) / {}", value, purchase_price, purchase_price),
            })
        })
}

impl Coin {
    /// Builds the stored record for `new_coin` under a backend-assigned id.
    ///
    /// Fails only when the ROI has to be derived and does not fit in a `Decimal`.
    pub fn from_new(id: String, new_coin: NewCoin) -> Result<Self> {
        let roi = match new_coin.roi {
            Some(roi) => roi,
            None => compute_roi(new_coin.purchase_price, new_coin.current_value)?,
        };
        Ok(Self {
            id,
            name: new_coin.name,
            image: new_coin.image,
            description: new_coin.description,
            grade: new_coin.grade,
            mint: new_coin.mint,
            year: new_coin.year,
            acquisition_date: new_coin.acquisition_date,
            purchase_price: new_coin.purchase_price,
            current_value: new_coin.current_value,
            roi,
            is_sold: new_coin.is_sold,
            sold_price: new_coin.sold_price,
            sold_date: new_coin.sold_date,
        })
    }

    /// Validates the coin record, including the disposition invariant.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        validate_fields(
            &self.name,
            self.purchase_price,
            self.current_value,
            self.roi,
            self.is_sold,
            self.sold_price,
            self.sold_date,
        )
    }

    /// Sale details when the coin is sold and both sale fields are present.
    pub fn sale(&self) -> Option<SaleDetails> {
        if !self.is_sold {
            return None;
        }
        match (self.sold_price, self.sold_date) {
            (Some(sold_price), Some(sold_date)) => Some(SaleDetails {
                sold_price,
                sold_date,
            }),
            _ => None,
        }
    }

    /// Realised profit of a sold coin (`sold_price - purchase_price`).
    pub fn realized_profit(&self) -> Option<Decimal> {
        if !self.is_sold {
            return None;
        }
        self.sold_price.map(|price| price - self.purchase_price)
    }

    /// Returns the coin transitioned to the sold state.
    pub fn into_sold(self, sale: SaleDetails) -> Self {
        Self {
            is_sold: true,
            sold_price: Some(sale.sold_price),
            sold_date: Some(sale.sold_date),
            ..self
        }
    }

    /// Returns the coin transitioned back to the held state.
    pub fn into_unsold(self) -> Self {
        Self {
            is_sold: false,
            sold_price: None,
            sold_date: None,
            ..self
        }
    }
}

impl NewCoin {
    /// Validates the new coin data, including the ROI it would be stored with.
    pub fn validate(&self) -> Result<()> {
        let roi = match self.roi {
            Some(roi) => roi,
            None => compute_roi(self.purchase_price, self.current_value)?,
        };
        validate_fields(
            &self.name,
            self.purchase_price,
            self.current_value,
            roi,
            self.is_sold,
            self.sold_price,
            self.sold_date,
        )
    }
}

impl SaleDetails {
    pub fn new(sold_price: Decimal, sold_date: NaiveDate) -> Self {
        Self {
            sold_price,
            sold_date,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_amount("soldPrice", self.sold_price)
    }
}

fn validate_fields(
    name: &str,
    purchase_price: Decimal,
    current_value: Decimal,
    roi: Decimal,
    is_sold: bool,
    sold_price: Option<Decimal>,
    sold_date: Option<NaiveDate>,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Coin name cannot be empty".to_string(),
        )));
    }
    ensure_amount("purchasePrice", purchase_price)?;
    ensure_amount("currentValue", current_value)?;
    ensure_in_range("roi", roi)?;

    if is_sold {
        let price = sold_price.ok_or_else(|| {
            Error::Validation(ValidationError::MissingField("soldPrice".to_string()))
        })?;
        ensure_amount("soldPrice", price)?;
        if sold_date.is_none() {
            return Err(Error::Validation(ValidationError::MissingField(
                "soldDate".to_string(),
            )));
        }
        // The realised ROI is derived by the summary, so it must be representable.
        ensure_in_range("soldRoi", compute_roi(purchase_price, price)?)?;
    } else if sold_price.is_some() || sold_date.is_some() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Sale details are only allowed on sold coins".to_string(),
        )));
    }
    Ok(())
}

/// Checks that a money amount is neither negative nor above `MAX_AMOUNT`.
pub(crate) fn ensure_amount(field: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(Error::Validation(ValidationError::NegativeAmount {
            field: field.to_string(),
            value: value.to_string(),
        }));
    }
    ensure_in_range(field, value)
}

fn ensure_in_range(field: &str, value: Decimal) -> Result<()> {
    if value.abs() > MAX_AMOUNT {
        return Err(Error::Validation(ValidationError::AmountOutOfRange {
            field: field.to_string(),
            value: value.to_string(),
        }));
    }
    Ok(())
}
