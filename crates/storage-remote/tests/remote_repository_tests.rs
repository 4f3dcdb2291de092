//! Integration tests for the remote coin repository over the in-memory
//! document store.

use chrono::NaiveDate;
use coinfolio_core::coins::{
    Coin, CoinRepositoryTrait, CoinService, CoinServiceTrait, NewCoin, SaleDetails,
};
use coinfolio_core::errors::{Error, StorageError};
use coinfolio_core::events::{CoinListener, CollectingDomainEventSink, DomainEvent};
use coinfolio_storage_remote::{
    DocumentFields, DocumentStore, InMemoryDocumentStore, RemoteCoinRepository,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_coin(name: &str, purchase_price: Decimal, current_value: Decimal) -> NewCoin {
    NewCoin {
        name: name.to_string(),
        image: String::new(),
        description: None,
        grade: Some("MS-63".to_string()),
        mint: Some("Philadelphia".to_string()),
        year: Some(1921),
        acquisition_date: date(2023, 6, 15),
        purchase_price,
        current_value,
        roi: None,
        is_sold: false,
        sold_price: None,
        sold_date: None,
    }
}

fn setup() -> (Arc<InMemoryDocumentStore>, RemoteCoinRepository) {
    let store = Arc::new(InMemoryDocumentStore::new());
    let repository = RemoteCoinRepository::new(store.clone());
    (store, repository)
}

fn recording(seen: &Arc<Mutex<Vec<Vec<Coin>>>>) -> CoinListener {
    let seen = seen.clone();
    Arc::new(move |coins: Vec<Coin>| seen.lock().unwrap().push(coins))
}

#[tokio::test]
async fn test_create_assigns_document_key_as_id() {
    let (store, repository) = setup();

    let coin = repository
        .create(new_coin("1921 Morgan Dollar", dec!(100), dec!(150)))
        .await
        .unwrap();

    let documents = store.list_documents("coins").await.unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].id, coin.id);
    assert_eq!(coin.roi, dec!(50));
    assert_eq!(repository.list().await.unwrap(), vec![coin]);
}

#[tokio::test]
async fn test_update_sends_full_field_set() {
    let (store, repository) = setup();
    let coin = repository
        .create(new_coin("Peace Dollar", dec!(40), dec!(44)))
        .await
        .unwrap();

    let sold = coin.clone().into_sold(SaleDetails::new(dec!(60), date(2024, 1, 5)));
    repository.update(sold.clone()).await.unwrap();
    let unsold = sold.into_unsold();
    repository.update(unsold.clone()).await.unwrap();

    let documents = store.list_documents("coins").await.unwrap();
    assert_eq!(documents[0].fields.get("soldPrice"), Some(&Value::Null));
    assert_eq!(documents[0].fields.get("soldDate"), Some(&Value::Null));
    assert_eq!(repository.list().await.unwrap(), vec![unsold]);
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let (_store, repository) = setup();
    let mut coin = repository
        .create(new_coin("Buffalo Nickel", dec!(2), dec!(3)))
        .await
        .unwrap();
    coin.id = "missing".to_string();

    let err = repository.update(coin).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let (_store, repository) = setup();
    let coin = repository
        .create(new_coin("Walking Liberty", dec!(15), dec!(20)))
        .await
        .unwrap();

    repository.delete(&coin.id).await.unwrap();
    repository.delete(&coin.id).await.unwrap();
    assert!(repository.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_undecodable_document_fails_list_but_is_skipped_by_feed() {
    let (store, repository) = setup();
    let good = repository
        .create(new_coin("Good", dec!(1), dec!(2)))
        .await
        .unwrap();
    let mut broken = DocumentFields::new();
    broken.insert("name".to_string(), json!("No dates"));
    store.add_document("coins", broken).await.unwrap();

    let err = repository.list().await.unwrap_err();
    assert!(matches!(err, Error::Storage(StorageError::Encoding(_))));

    let seen = Arc::new(Mutex::new(Vec::new()));
    let _subscription = repository.subscribe(recording(&seen)).await.unwrap();
    assert_eq!(seen.lock().unwrap().as_slice(), &[vec![good]]);
}

#[tokio::test]
async fn test_subscribe_fires_immediately_then_on_every_change() {
    let (store, repository) = setup();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let subscription = repository.subscribe(recording(&seen)).await.unwrap();
    assert_eq!(seen.lock().unwrap().len(), 1);
    assert!(seen.lock().unwrap()[0].is_empty());

    let coin = repository
        .create(new_coin("Morgan", dec!(100), dec!(150)))
        .await
        .unwrap();
    assert_eq!(seen.lock().unwrap().last(), Some(&vec![coin.clone()]));

    repository.delete(&coin.id).await.unwrap();
    assert_eq!(seen.lock().unwrap().len(), 3);

    subscription.cancel();
    subscription.cancel();
    assert_eq!(store.watcher_count("coins"), 0);
    repository
        .create(new_coin("Late", dec!(1), dec!(1)))
        .await
        .unwrap();
    assert_eq!(seen.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_custom_collection_is_isolated() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let vault = RemoteCoinRepository::with_collection(store.clone(), "vault");
    let default = RemoteCoinRepository::new(store.clone());

    vault
        .create(new_coin("Vaulted", dec!(1), dec!(1)))
        .await
        .unwrap();
    assert_eq!(vault.collection(), "vault");
    assert_eq!(vault.list().await.unwrap().len(), 1);
    assert!(default.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_morgan_scenario_through_service() {
    let (_store, repository) = setup();
    let sink = Arc::new(CollectingDomainEventSink::new());
    let service = CoinService::new(Arc::new(repository), sink.clone());

    let added = service
        .add_coin(new_coin("1921 Morgan Dollar", dec!(100), dec!(150)))
        .await
        .unwrap();
    let listed = service.list_all().await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].current_value, dec!(150));

    let sold = service
        .mark_sold(&added.id, SaleDetails::new(dec!(180), date(2024, 3, 1)))
        .await
        .unwrap();
    assert!(sold.is_sold);
    assert_eq!(sold.realized_profit(), Some(dec!(80)));
    assert_eq!(service.get_coin(&added.id).await.unwrap(), sold);

    let events = sink.events();
    assert!(matches!(events.first(), Some(DomainEvent::CoinAdded { .. })));
    assert!(matches!(events.last(), Some(DomainEvent::CoinSold { .. })));
}
