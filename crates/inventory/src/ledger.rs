//! The stock ledger: atomic reserve / replenish over per-item counts.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use stockledger_core::{DomainError, DomainResult, ItemId, Quantity};
use stockledger_events::{EventBus, EventEnvelope, InMemoryEventBus};

use crate::config::{ConfigError, LedgerConfig};
use crate::event::{STOCK_STREAM_TYPE, StockEnvelope, StockEvent, StockReplenished, StockReserved};
use crate::reservation::Reservation;

/// Per-item state guarded by the item's own mutex.
#[derive(Debug, Default)]
struct Slot {
    on_hand: u64,
    /// Number of mutations applied so far; doubles as the audit sequence number.
    sequence: u64,
}

impl Slot {
    fn take(&mut self, quantity: Quantity) -> Option<(u64, u64)> {
        let remaining = self.on_hand.checked_sub(quantity.get())?;
        self.on_hand = remaining;
        self.sequence += 1;
        Some((remaining, self.sequence))
    }

    fn restock(&mut self, item_id: &ItemId, quantity: Quantity) -> DomainResult<(u64, u64)> {
        let on_hand = self.on_hand.checked_add(quantity.get()).ok_or_else(|| {
            DomainError::invalid_argument(format!(
                "replenishing {quantity} would overflow stock for {item_id}"
            ))
        })?;
        self.on_hand = on_hand;
        self.sequence += 1;
        Ok((on_hand, self.sequence))
    }
}

/// Process-wide stock counts, keyed by item.
///
/// Locking is two-level:
/// - the map `RwLock` is held for reading on every operation and for writing
///   only when a replenish creates a new item;
/// - each item's `Mutex` covers the whole check-and-update of that item.
///
/// Operations on one item are therefore linearizable, and operations on
/// different items only contend on the (shared) map read lock.
///
/// Every slot mutation is a plain assignment after all checks have passed,
/// so a panic while a lock is held cannot leave a slot half-written; poisoned
/// locks are recovered instead of propagated.
#[derive(Debug)]
pub struct StockLedger<B = InMemoryEventBus<StockEnvelope>> {
    items: RwLock<HashMap<ItemId, Mutex<Slot>>>,
    bus: Option<B>,
}

impl StockLedger {
    /// Create an empty ledger with no audit bus.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
            bus: None,
        }
    }

    /// Create a ledger seeded with initial counts.
    ///
    /// Zero is a valid initial count; negative counts, empty identifiers and
    /// duplicate identifiers are rejected.
    pub fn with_initial_stock<I, S>(initial: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut items = HashMap::new();
        for (raw_id, count) in initial {
            let item_id = ItemId::new(raw_id)?;
            let on_hand = u64::try_from(count).map_err(|_| {
                DomainError::invalid_argument(format!(
                    "initial stock for {item_id} cannot be negative (got {count})"
                ))
            })?;
            if items.contains_key(&item_id) {
                return Err(DomainError::invalid_argument(format!(
                    "duplicate initial stock entry for {item_id}"
                )));
            }
            items.insert(item_id, Mutex::new(Slot { on_hand, sequence: 0 }));
        }

        debug!(items = items.len(), "stock ledger seeded");

        Ok(Self {
            items: RwLock::new(items),
            bus: None,
        })
    }

    pub fn from_config(config: &LedgerConfig) -> DomainResult<Self> {
        Self::with_initial_stock(
            config
                .initial_stock
                .iter()
                .map(|(item, count)| (item.as_str(), *count)),
        )
    }

    /// Build a ledger from `STOCKLEDGER_INITIAL_STOCK` (empty when unset).
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = LedgerConfig::from_env()?;
        Ok(Self::from_config(&config)?)
    }
}

impl Default for StockLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> StockLedger<B>
where
    B: EventBus<StockEnvelope>,
{
    /// Attach an audit bus; every successful mutation is published on it.
    pub fn with_event_bus<B2>(self, bus: B2) -> StockLedger<B2>
    where
        B2: EventBus<StockEnvelope>,
    {
        StockLedger {
            items: self.items,
            bus: Some(bus),
        }
    }

    /// Atomically take `quantity` units of `item` if that many are on hand.
    ///
    /// An unknown item has zero stock. Returns `Insufficient` (and leaves
    /// stock untouched) when the request cannot be met in full.
    #[instrument(skip(self), level = "debug")]
    pub fn reserve(&self, item: &str, quantity: i64) -> DomainResult<Reservation> {
        let (item_id, quantity) = validate("reserve", item, quantity)?;

        let outcome = {
            let items = read_items(&self.items);
            match items.get(&item_id) {
                None => Err(0),
                Some(slot) => {
                    let mut slot = lock_slot(slot);
                    slot.take(quantity).ok_or(slot.on_hand)
                }
            }
        };

        match outcome {
            Ok((remaining, sequence)) => {
                debug!(item = %item_id, %quantity, remaining, "stock reserved");
                self.publish(
                    sequence,
                    StockEvent::StockReserved(StockReserved {
                        item_id,
                        quantity,
                        remaining,
                        occurred_at: Utc::now(),
                    }),
                );
                Ok(Reservation::Reserved { remaining })
            }
            Err(available) => {
                debug!(item = %item_id, %quantity, available, "insufficient stock");
                Ok(Reservation::Insufficient { available })
            }
        }
    }

    /// Atomically add `quantity` units to `item`, creating it if absent.
    ///
    /// Returns the new on-hand count.
    #[instrument(skip(self), level = "debug")]
    pub fn replenish(&self, item: &str, quantity: i64) -> DomainResult<u64> {
        let (item_id, quantity) = validate("replenish", item, quantity)?;

        let (on_hand, sequence) = self.restock(&item_id, quantity).inspect_err(|e| {
            warn!(item = %item_id, error = %e, "replenish rejected");
        })?;

        debug!(item = %item_id, %quantity, on_hand, "stock replenished");
        self.publish(
            sequence,
            StockEvent::StockReplenished(StockReplenished {
                item_id,
                quantity,
                on_hand,
                occurred_at: Utc::now(),
            }),
        );
        Ok(on_hand)
    }

    /// Current stock for `item` (0 if unknown).
    ///
    /// Diagnostics only: the value may be stale as soon as it is returned,
    /// so never decide a purchase on it. Use [`reserve`](Self::reserve).
    pub fn peek(&self, item: &str) -> u64 {
        read_items(&self.items)
            .get(item)
            .map(|slot| lock_slot(slot).on_hand)
            .unwrap_or(0)
    }

    /// Point-in-time copy of every known item's stock (diagnostics only).
    ///
    /// Each count is individually consistent; counts of different items may
    /// come from slightly different instants.
    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        read_items(&self.items)
            .iter()
            .map(|(item_id, slot)| (item_id.to_string(), lock_slot(slot).on_hand))
            .collect()
    }

    fn restock(&self, item_id: &ItemId, quantity: Quantity) -> DomainResult<(u64, u64)> {
        {
            let items = read_items(&self.items);
            if let Some(slot) = items.get(item_id) {
                let mut slot = lock_slot(slot);
                return slot.restock(item_id, quantity);
            }
        }

        // Absent: insert under the map write lock. Another replenish may have
        // won the race in between; `entry` picks up its slot in that case.
        let mut items = write_items(&self.items);
        let slot = items.entry(item_id.clone()).or_default();
        slot.get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .restock(item_id, quantity)
    }

    fn publish(&self, sequence: u64, event: StockEvent) {
        let Some(bus) = &self.bus else {
            return;
        };

        let stream_id = event.item_id().to_string();
        let envelope = EventEnvelope::new(
            Uuid::now_v7(),
            stream_id,
            STOCK_STREAM_TYPE,
            sequence,
            event,
        );

        // Stock has already changed; a lost audit message must not undo that.
        if let Err(e) = bus.publish(envelope) {
            warn!(error = ?e, sequence, "failed to publish stock event");
        }
    }
}

fn validate(op: &'static str, item: &str, quantity: i64) -> DomainResult<(ItemId, Quantity)> {
    ItemId::new(item)
        .and_then(|item_id| Ok((item_id, Quantity::new(quantity)?)))
        .inspect_err(|e| warn!(op, item, quantity, error = %e, "stock operation rejected"))
}

fn read_items(
    items: &RwLock<HashMap<ItemId, Mutex<Slot>>>,
) -> RwLockReadGuard<'_, HashMap<ItemId, Mutex<Slot>>> {
    items.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_items(
    items: &RwLock<HashMap<ItemId, Mutex<Slot>>>,
) -> RwLockWriteGuard<'_, HashMap<ItemId, Mutex<Slot>>> {
    items.write().unwrap_or_else(PoisonError::into_inner)
}

fn lock_slot(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
