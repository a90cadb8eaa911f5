//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. In this crate
/// both [`ItemId`](crate::ItemId) and [`Quantity`](crate::Quantity) are value
/// objects: they validate once on construction and are then passed around
/// freely, so the ledger never re-checks raw caller input.
///
/// ```
/// use stockledger_core::{ItemId, Quantity};
///
/// let a = ItemId::new("widget").unwrap();
/// let b = ItemId::new("widget").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(Quantity::new(3).unwrap(), Quantity::new(3).unwrap());
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
