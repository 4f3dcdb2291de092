//! Tests for coin domain models.

use crate::coins::{compute_roi, Coin, NewCoin, SaleDetails};
use crate::errors::{Error, ValidationError};
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn morgan() -> NewCoin {
    NewCoin {
        name: "1921 Morgan".to_string(),
        image: "coins/morgan.jpg".to_string(),
        description: Some("Morgan silver dollar".to_string()),
        grade: Some("MS-63".to_string()),
        mint: Some("Philadelphia".to_string()),
        year: Some(1921),
        acquisition_date: date(2023, 4, 2),
        purchase_price: dec!(100),
        current_value: dec!(150),
        roi: Some(dec!(50)),
        is_sold: false,
        sold_price: None,
        sold_date: None,
    }
}

// ==================== ROI ====================

#[test]
fn test_compute_roi() {
    assert_eq!(compute_roi(dec!(100), dec!(150)).unwrap(), dec!(50));
    assert_eq!(compute_roi(dec!(200), dec!(150)).unwrap(), dec!(-25));
    assert_eq!(compute_roi(dec!(3), dec!(4)).unwrap(), dec!(33.33));
    assert_eq!(compute_roi(dec!(0), dec!(150)).unwrap(), dec!(0));
}

#[test]
fn test_compute_roi_rejects_unrepresentable_ratio() {
    let err = compute_roi(dec!(0.0001), dec!(1e26)).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::AmountOutOfRange { ref field, .. }) if field == "roi"
    ));
}

#[test]
fn test_from_new_derives_missing_roi() {
    let mut new_coin = morgan();
    new_coin.roi = None;
    new_coin.current_value = dec!(120);

    let coin = Coin::from_new("c1".to_string(), new_coin).unwrap();
    assert_eq!(coin.id, "c1");
    assert_eq!(coin.roi, dec!(20));
}

#[test]
fn test_from_new_keeps_explicit_roi() {
    let mut new_coin = morgan();
    new_coin.roi = Some(dec!(7.5));
    let coin = Coin::from_new("c1".to_string(), new_coin).unwrap();
    assert_eq!(coin.roi, dec!(7.5));
}

// ==================== Validation ====================

#[test]
fn test_valid_new_coin() {
    assert!(morgan().validate().is_ok());
}

#[test]
fn test_empty_name_is_rejected() {
    let mut new_coin = morgan();
    new_coin.name = "   ".to_string();
    assert!(matches!(
        new_coin.validate(),
        Err(Error::Validation(ValidationError::InvalidInput(_)))
    ));
}

#[test]
fn test_negative_amounts_are_rejected() {
    let mut new_coin = morgan();
    new_coin.purchase_price = dec!(-1);
    match new_coin.validate() {
        Err(Error::Validation(ValidationError::NegativeAmount { field, .. })) => {
            assert_eq!(field, "purchasePrice")
        }
        other => panic!("Expected NegativeAmount, got {:?}", other),
    }

    let mut new_coin = morgan();
    new_coin.current_value = dec!(-0.01);
    assert!(new_coin.validate().is_err());
}

#[test]
fn test_sold_coin_requires_sale_details() {
    let mut new_coin = morgan();
    new_coin.is_sold = true;
    new_coin.sold_date = Some(date(2024, 1, 1));
    match new_coin.validate() {
        Err(Error::Validation(ValidationError::MissingField(field))) => {
            assert_eq!(field, "soldPrice")
        }
        other => panic!("Expected MissingField, got {:?}", other),
    }

    new_coin.sold_price = Some(dec!(180));
    new_coin.sold_date = None;
    match new_coin.validate() {
        Err(Error::Validation(ValidationError::MissingField(field))) => {
            assert_eq!(field, "soldDate")
        }
        other => panic!("Expected MissingField, got {:?}", other),
    }
}

#[test]
fn test_held_coin_rejects_sale_details() {
    let mut new_coin = morgan();
    new_coin.sold_price = Some(dec!(180));
    assert!(new_coin.validate().is_err());
}

#[test]
fn test_amounts_above_ceiling_are_rejected() {
    let mut new_coin = morgan();
    new_coin.current_value = dec!(1e26);
    assert!(matches!(
        new_coin.validate(),
        Err(Error::Validation(ValidationError::AmountOutOfRange { .. }))
    ));

    assert!(matches!(
        SaleDetails::new(dec!(1e16), date(2024, 1, 1)).validate(),
        Err(Error::Validation(ValidationError::AmountOutOfRange { .. }))
    ));
}

#[test]
fn test_derived_roi_must_be_in_range() {
    let mut new_coin = morgan();
    new_coin.roi = None;
    new_coin.purchase_price = dec!(0.0001);
    new_coin.current_value = dec!(1000000000000000);
    assert!(new_coin.validate().is_err());

    new_coin.current_value = dec!(150);
    assert!(new_coin.validate().is_ok());
}

#[test]
fn test_coin_requires_id() {
    let coin = Coin::from_new(String::new(), morgan()).unwrap();
    assert!(matches!(
        coin.validate(),
        Err(Error::Validation(ValidationError::MissingField(_)))
    ));
}

// ==================== Sell transition ====================

#[test]
fn test_into_sold_and_back() {
    let coin = Coin::from_new("c1".to_string(), morgan()).unwrap();
    assert_eq!(coin.sale(), None);
    assert_eq!(coin.realized_profit(), None);

    let sale = SaleDetails::new(dec!(180), date(2024, 6, 1));
    let sold = coin.clone().into_sold(sale);
    assert!(sold.is_sold);
    assert_eq!(sold.sale(), Some(sale));
    assert_eq!(sold.realized_profit(), Some(dec!(80)));
    assert!(sold.validate().is_ok());

    let held = sold.into_unsold();
    assert_eq!(held, coin);
}

#[test]
fn test_sale_details_validation() {
    assert!(SaleDetails::new(dec!(0), date(2024, 1, 1)).validate().is_ok());
    assert!(SaleDetails::new(dec!(-5), date(2024, 1, 1))
        .validate()
        .is_err());
}

// ==================== Serialization ====================

#[test]
fn test_coin_serializes_camel_case() {
    let coin = Coin::from_new("c1".to_string(), morgan())
        .unwrap()
        .into_sold(SaleDetails::new(dec!(180.50), date(2024, 6, 1)));
    let json = serde_json::to_value(&coin).unwrap();

    assert_eq!(json["purchasePrice"], "100");
    assert_eq!(json["soldPrice"], "180.50");
    assert_eq!(json["soldDate"], "2024-06-01");
    assert_eq!(json["acquisitionDate"], "2023-04-02");
    assert_eq!(json["isSold"], true);

    let back: Coin = serde_json::from_value(json).unwrap();
    assert_eq!(back, coin);
}

#[test]
fn test_new_coin_ignores_caller_supplied_id() {
    let json = r#"{
        "id": "caller-chosen",
        "name": "Buffalo nickel",
        "acquisitionDate": "2022-11-05",
        "purchasePrice": 12.5,
        "currentValue": "15"
    }"#;
    let new_coin: NewCoin = serde_json::from_str(json).unwrap();
    assert_eq!(new_coin.name, "Buffalo nickel");
    assert_eq!(new_coin.purchase_price, dec!(12.5));
    assert_eq!(new_coin.roi, None);
    assert!(!new_coin.is_sold);
    assert!(new_coin.image.is_empty());
}
