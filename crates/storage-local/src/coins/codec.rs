//! Encoding of the coin collection stored in the key-value slot.

use coinfolio_core::coins::Coin;

use crate::errors::LocalStorageError;

/// Decodes the slot's text; an absent or blank slot is an empty collection.
pub(crate) fn decode_coins(raw: Option<&str>) -> Result<Vec<Coin>, LocalStorageError> {
    match raw {
        Some(text) if !text.trim().is_empty() => Ok(serde_json::from_str(text)?),
        _ => Ok(Vec::new()),
    }
}

pub(crate) fn encode_coins(coins: &[Coin]) -> Result<String, LocalStorageError> {
    Ok(serde_json::to_string(coins)?)
}
