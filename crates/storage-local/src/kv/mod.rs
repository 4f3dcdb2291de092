//! Key-value persistence primitive backing the local strategy.

mod file;
mod kv_traits;
mod memory;

pub use file::FileKeyValueStore;
pub use kv_traits::KeyValueStore;
pub use memory::InMemoryKeyValueStore;
