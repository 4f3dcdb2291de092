//! Local storage implementation for coins.

mod codec;
mod repository;
mod watcher;

pub use repository::LocalCoinRepository;
