//! Inventory domain module: concurrent stock reservation.
//!
//! [`StockLedger`] is the only owner of per-item stock counts. Reservations
//! check and decrement in one critical section, so concurrent buyers can
//! never overcommit stock or drive a count below zero.

pub mod config;
pub mod event;
pub mod ledger;
pub mod reservation;

pub use config::{ConfigError, LedgerConfig};
pub use event::{STOCK_STREAM_TYPE, StockEnvelope, StockEvent, StockReplenished, StockReserved};
pub use ledger::StockLedger;
pub use reservation::Reservation;
