//! Event primitives: the `Event` trait, stream envelopes and a pub/sub bus.
//!
//! Mechanics only; concrete event types live with the domain that emits them.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
