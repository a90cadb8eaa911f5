//! `stockledger-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no locking, no IO).

pub mod error;
pub mod id;
pub mod quantity;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::ItemId;
pub use quantity::Quantity;
pub use value_object::ValueObject;
