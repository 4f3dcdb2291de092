//! Wire format of coin documents.
//!
//! Calendar dates travel as `{seconds, nanos}` timestamps at midnight UTC.
//! Amounts are decimal strings. Absent optional fields are sent as explicit
//! `null`, so a full-field update clears them on the server.

use chrono::{Duration, NaiveDate};
use coinfolio_core::coins::Coin;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::document::{Document, DocumentFields};
use crate::errors::RemoteStorageError;

const SECONDS_PER_DAY: i64 = 86_400;
const NANOS_PER_SECOND: i32 = 1_000_000_000;

fn unix_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
}

/// Point in time as seconds and nanoseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireTimestamp {
    pub seconds: i64,
    #[serde(default)]
    pub nanos: i32,
}

impl WireTimestamp {
    /// Timestamp of midnight UTC on `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        let days = date.signed_duration_since(unix_epoch()).num_days();
        Self {
            seconds: days * SECONDS_PER_DAY,
            nanos: 0,
        }
    }

    /// UTC calendar date containing this instant. The time of day is dropped.
    pub fn to_date(self) -> Option<NaiveDate> {
        if !(0..NANOS_PER_SECOND).contains(&self.nanos) {
            return None;
        }
        let days = self.seconds.div_euclid(SECONDS_PER_DAY);
        unix_epoch().checked_add_signed(Duration::try_days(days)?)
    }
}

/// Field set of one coin document. The coin id is the document key and is
/// not repeated in the fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinDocument {
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub description: Option<String>,
    pub grade: Option<String>,
    pub mint: Option<String>,
    pub year: Option<i32>,
    pub acquisition_date: WireTimestamp,
    pub purchase_price: Decimal,
    pub current_value: Decimal,
    pub roi: Decimal,
    #[serde(default)]
    pub is_sold: bool,
    pub sold_price: Option<Decimal>,
    pub sold_date: Option<WireTimestamp>,
}

impl From<&Coin> for CoinDocument {
    fn from(coin: &Coin) -> Self {
        Self {
            name: coin.name.clone(),
            image: coin.image.clone(),
            description: coin.description.clone(),
            grade: coin.grade.clone(),
            mint: coin.mint.clone(),
            year: coin.year,
            acquisition_date: WireTimestamp::from_date(coin.acquisition_date),
            purchase_price: coin.purchase_price,
            current_value: coin.current_value,
            roi: coin.roi,
            is_sold: coin.is_sold,
            sold_price: coin.sold_price,
            sold_date: coin.sold_date.map(WireTimestamp::from_date),
        }
    }
}

impl CoinDocument {
    /// Rebuilds the domain coin stored under document key `id`.
    pub fn into_coin(self, id: &str) -> Result<Coin, RemoteStorageError> {
        let invalid_date = |field: &str| RemoteStorageError::Decode {
            id: id.to_string(),
            message: format!("{} is not a valid timestamp", field),
        };
        let acquisition_date = self
            .acquisition_date
            .to_date()
            .ok_or_else(|| invalid_date("acquisitionDate"))?;
        let sold_date = match self.sold_date {
            Some(ts) => Some(ts.to_date().ok_or_else(|| invalid_date("soldDate"))?),
            None => None,
        };

        Ok(Coin {
            id: id.to_string(),
            name: self.name,
            image: self.image,
            description: self.description,
            grade: self.grade,
            mint: self.mint,
            year: self.year,
            acquisition_date,
            purchase_price: self.purchase_price,
            current_value: self.current_value,
            roi: self.roi,
            is_sold: self.is_sold,
            sold_price: self.sold_price,
            sold_date,
        })
    }
}

/// Encodes every field of `coin` except its id.
pub(crate) fn encode_coin(coin: &Coin) -> Result<DocumentFields, RemoteStorageError> {
    match serde_json::to_value(CoinDocument::from(coin))? {
        serde_json::Value::Object(fields) => Ok(fields),
        other => Err(RemoteStorageError::Decode {
            id: coin.id.clone(),
            message: format!("coin encoded as {} instead of an object", other),
        }),
    }
}

pub(crate) fn decode_coin(document: &Document) -> Result<Coin, RemoteStorageError> {
    let wire: CoinDocument =
        serde_json::from_value(serde_json::Value::Object(document.fields.clone())).map_err(
            |e| RemoteStorageError::Decode {
                id: document.id.clone(),
                message: e.to_string(),
            },
        )?;
    wire.into_coin(&document.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn morgan() -> Coin {
        Coin {
            id: "doc-1".to_string(),
            name: "1921 Morgan Dollar".to_string(),
            image: "https://img.example/morgan.png".to_string(),
            description: None,
            grade: Some("MS-63".to_string()),
            mint: None,
            year: Some(1921),
            acquisition_date: date(2023, 6, 15),
            purchase_price: dec!(100),
            current_value: dec!(150),
            roi: dec!(50),
            is_sold: false,
            sold_price: None,
            sold_date: None,
        }
    }

    #[test]
    fn test_dates_encode_at_midnight_utc() {
        assert_eq!(
            WireTimestamp::from_date(date(1970, 1, 2)),
            WireTimestamp {
                seconds: 86_400,
                nanos: 0
            }
        );
        assert_eq!(
            WireTimestamp::from_date(date(1969, 12, 31)).seconds,
            -86_400
        );
        assert_eq!(
            WireTimestamp::from_date(date(2023, 6, 15)).seconds,
            1_686_787_200
        );
    }

    #[test]
    fn test_time_of_day_is_dropped_on_decode() {
        let afternoon = WireTimestamp {
            seconds: 1_686_787_200 + 15 * 3_600,
            nanos: 500,
        };
        assert_eq!(afternoon.to_date(), Some(date(2023, 6, 15)));

        let before_epoch = WireTimestamp {
            seconds: -1,
            nanos: 0,
        };
        assert_eq!(before_epoch.to_date(), Some(date(1969, 12, 31)));
    }

    #[test]
    fn test_out_of_range_nanos_are_rejected() {
        let ts = WireTimestamp {
            seconds: 0,
            nanos: NANOS_PER_SECOND,
        };
        assert_eq!(ts.to_date(), None);
    }

    #[test]
    fn test_absent_sale_fields_are_explicit_nulls() {
        let fields = encode_coin(&morgan()).unwrap();

        assert_eq!(fields.get("soldDate"), Some(&Value::Null));
        assert_eq!(fields.get("soldPrice"), Some(&Value::Null));
        assert_eq!(fields.get("description"), Some(&Value::Null));
        assert_eq!(
            fields.get("acquisitionDate"),
            Some(&json!({"seconds": 1_686_787_200_i64, "nanos": 0}))
        );
        assert_eq!(fields.get("purchasePrice"), Some(&json!("100")));
        assert!(!fields.contains_key("id"));
    }

    #[test]
    fn test_sold_coin_keeps_calendar_dates() {
        let sold = morgan().into_sold(coinfolio_core::coins::SaleDetails::new(
            dec!(180),
            date(2024, 2, 29),
        ));
        let document = Document::new("doc-1", encode_coin(&sold).unwrap());

        let decoded = decode_coin(&document).unwrap();
        assert_eq!(decoded, sold);
        assert_eq!(decoded.sold_date, Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_missing_optional_fields_decode_as_absent() {
        let fields = match json!({
            "name": "Buffalo Nickel",
            "acquisitionDate": {"seconds": 0},
            "purchasePrice": "2.50",
            "currentValue": 3,
            "roi": "20"
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        let coin = decode_coin(&Document::new("n1", fields)).unwrap();
        assert_eq!(coin.id, "n1");
        assert_eq!(coin.acquisition_date, date(1970, 1, 1));
        assert_eq!(coin.current_value, dec!(3));
        assert!(!coin.is_sold);
        assert_eq!(coin.sold_date, None);
        assert_eq!(coin.image, "");
    }

    #[test]
    fn test_undecodable_document_names_its_id() {
        let mut fields = DocumentFields::new();
        fields.insert("name".to_string(), json!(42));

        let err = decode_coin(&Document::new("broken", fields)).unwrap_err();
        assert!(matches!(err, RemoteStorageError::Decode { ref id, .. } if id == "broken"));
    }
}
