//! Document-collection primitive.

mod document_traits;
mod memory;

pub use document_traits::*;
pub use memory::InMemoryDocumentStore;
