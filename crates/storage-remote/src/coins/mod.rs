mod codec;
mod repository;

pub use codec::{CoinDocument, WireTimestamp};
pub use repository::RemoteCoinRepository;
