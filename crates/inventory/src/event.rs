use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockledger_core::{ItemId, Quantity};
use stockledger_events::{Event, EventEnvelope};

/// Stream type stamped on every stock envelope.
pub const STOCK_STREAM_TYPE: &str = "inventory.stock";

/// Envelope published on the ledger's audit bus.
pub type StockEnvelope = EventEnvelope<StockEvent>;

/// Event: StockReserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockReserved {
    pub item_id: ItemId,
    pub quantity: Quantity,
    pub remaining: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockReplenished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockReplenished {
    pub item_id: ItemId,
    pub quantity: Quantity,
    pub on_hand: u64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockEvent {
    StockReserved(StockReserved),
    StockReplenished(StockReplenished),
}

impl StockEvent {
    pub fn item_id(&self) -> &ItemId {
        match self {
            StockEvent::StockReserved(e) => &e.item_id,
            StockEvent::StockReplenished(e) => &e.item_id,
        }
    }

    /// Signed change this event applied to the item's stock.
    pub fn delta(&self) -> i128 {
        match self {
            StockEvent::StockReserved(e) => -i128::from(e.quantity.get()),
            StockEvent::StockReplenished(e) => i128::from(e.quantity.get()),
        }
    }

    /// Stock on hand right after this event took effect.
    pub fn on_hand_after(&self) -> u64 {
        match self {
            StockEvent::StockReserved(e) => e.remaining,
            StockEvent::StockReplenished(e) => e.on_hand,
        }
    }
}

impl Event for StockEvent {
    fn event_type(&self) -> &'static str {
        match self {
            StockEvent::StockReserved(_) => "inventory.stock.reserved",
            StockEvent::StockReplenished(_) => "inventory.stock.replenished",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            StockEvent::StockReserved(e) => e.occurred_at,
            StockEvent::StockReplenished(e) => e.occurred_at,
        }
    }
}
