use std::sync::Arc;

use anyhow::{bail, Context};
use coinfolio_core::coins::{CoinRepositoryTrait, CoinService, CoinServiceTrait};
use coinfolio_core::events::{DomainEventSink, LoggingDomainEventSink};
use coinfolio_core::portfolio::{PortfolioService, PortfolioServiceTrait};
use coinfolio_storage_local::{
    FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, LocalCoinRepository,
};
use coinfolio_storage_remote::{DocumentStore, RemoteCoinRepository};
use tracing::info;

use crate::config::{Backend, Config};

pub struct AppState {
    pub config: Config,
    /// Domain event sink shared by the services.
    pub domain_event_sink: Arc<dyn DomainEventSink>,
    pub coin_service: Arc<dyn CoinServiceTrait>,
    pub portfolio_service: Arc<dyn PortfolioServiceTrait>,
}

impl AppState {
    pub fn backend(&self) -> Backend {
        self.config.backend
    }

    /// Stops the portfolio's collection subscription.
    pub fn shutdown(&self) {
        self.portfolio_service.stop();
        info!("Coinfolio services stopped");
    }
}

/// Wires the services for the configured backend and starts the portfolio.
///
/// The remote backend needs a document store client from the caller.
pub async fn build_state(
    config: &Config,
    document_store: Option<Arc<dyn DocumentStore>>,
) -> anyhow::Result<Arc<AppState>> {
    let repository = build_repository(config, document_store)?;
    let domain_event_sink: Arc<dyn DomainEventSink> = Arc::new(LoggingDomainEventSink);

    let coin_service: Arc<dyn CoinServiceTrait> =
        Arc::new(CoinService::new(repository, domain_event_sink.clone()));
    let portfolio_service: Arc<dyn PortfolioServiceTrait> = Arc::new(PortfolioService::new(
        coin_service.clone(),
        domain_event_sink.clone(),
        config.cash_reserve,
    )?);
    portfolio_service
        .start()
        .await
        .context("Failed to subscribe the portfolio to the coin collection")?;

    Ok(Arc::new(AppState {
        config: config.clone(),
        domain_event_sink,
        coin_service,
        portfolio_service,
    }))
}

fn build_repository(
    config: &Config,
    document_store: Option<Arc<dyn DocumentStore>>,
) -> anyhow::Result<Arc<dyn CoinRepositoryTrait>> {
    match config.backend {
        Backend::Local => {
            let store: Arc<dyn KeyValueStore> = match &config.data_dir {
                Some(dir) => {
                    info!("Using file-backed local storage in {}", dir.display());
                    Arc::new(FileKeyValueStore::new(dir))
                }
                None => {
                    info!("Using in-memory local storage");
                    Arc::new(InMemoryKeyValueStore::new())
                }
            };
            Ok(Arc::new(
                LocalCoinRepository::with_key(store, config.storage_key.as_str())
                    .with_poll_interval(config.poll_interval),
            ))
        }
        Backend::Remote => {
            let Some(store) = document_store else {
                bail!("The remote backend requires a document store client");
            };
            info!("Using remote collection '{}'", config.collection);
            Ok(Arc::new(RemoteCoinRepository::with_collection(
                store,
                config.collection.as_str(),
            )))
        }
    }
}
