//! Domain events and change subscriptions.
//!
//! Domain events are emitted by core services after successful mutations.
//! Subscriptions are the cancellation handles returned by store change feeds.

mod domain_event;
mod sink;
mod subscription;

pub use domain_event::*;
pub use sink::*;
pub use subscription::*;
