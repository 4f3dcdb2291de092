//! Domain event types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Domain events emitted by core services after successful mutations.
///
/// These events represent facts about changes to the collection or the
/// cash reserve. Presentation adapters translate them into notifications.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A coin was added to the collection.
    CoinAdded { coin_id: String },

    /// A coin record was replaced.
    CoinUpdated { coin_id: String },

    /// A coin was marked as sold.
    CoinSold {
        coin_id: String,
        sold_price: Decimal,
    },

    /// A sold coin was moved back to the held state.
    CoinUnsold { coin_id: String },

    /// A coin was deleted (or was already absent).
    CoinDeleted { coin_id: String },

    /// The user changed the cash reserve.
    CashReserveChanged { amount: Decimal },
}

impl DomainEvent {
    pub fn coin_added(coin_id: impl Into<String>) -> Self {
        Self::CoinAdded {
            coin_id: coin_id.into(),
        }
    }

    pub fn coin_updated(coin_id: impl Into<String>) -> Self {
        Self::CoinUpdated {
            coin_id: coin_id.into(),
        }
    }

    pub fn coin_sold(coin_id: impl Into<String>, sold_price: Decimal) -> Self {
        Self::CoinSold {
            coin_id: coin_id.into(),
            sold_price,
        }
    }

    pub fn coin_unsold(coin_id: impl Into<String>) -> Self {
        Self::CoinUnsold {
            coin_id: coin_id.into(),
        }
    }

    pub fn coin_deleted(coin_id: impl Into<String>) -> Self {
        Self::CoinDeleted {
            coin_id: coin_id.into(),
        }
    }

    pub fn cash_reserve_changed(amount: Decimal) -> Self {
        Self::CashReserveChanged { amount }
    }

    /// The coin this event refers to, if any.
    pub fn coin_id(&self) -> Option<&str> {
        match self {
            Self::CoinAdded { coin_id }
            | Self::CoinUpdated { coin_id }
            | Self::CoinSold { coin_id, .. }
            | Self::CoinUnsold { coin_id }
            | Self::CoinDeleted { coin_id } => Some(coin_id),
            Self::CashReserveChanged { .. } => None,
        }
    }
}
