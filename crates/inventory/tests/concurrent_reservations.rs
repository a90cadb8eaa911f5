//! Concurrent reservation scenarios against a shared ledger.
//!
//! A naive check-then-act implementation (read stock, compare, then write
//! back) fails these under load.

use std::collections::HashMap;
use std::sync::{Arc, Barrier};
use std::thread;

use stockledger_events::{EventBus, InMemoryEventBus};
use stockledger_inventory::{Reservation, StockEnvelope, StockLedger};

#[test]
fn thousand_buyers_for_a_hundred_tickets() {
    stockledger_observability::init();

    let ledger = StockLedger::with_initial_stock([("ticket", 100)]).unwrap();
    let barrier = Barrier::new(1000);

    let outcomes: Vec<Reservation> = thread::scope(|s| {
        let handles: Vec<_> = (0..1000)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    ledger.reserve("ticket", 1).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let reserved = outcomes.iter().filter(|r| r.is_reserved()).count();
    let insufficient = outcomes
        .iter()
        .filter(|r| matches!(r, Reservation::Insufficient { .. }))
        .count();

    assert_eq!(reserved, 100);
    assert_eq!(insufficient, 900);
    assert_eq!(ledger.peek("ticket"), 0);
}

#[test]
fn items_do_not_interfere_with_each_other() {
    let ledger = StockLedger::with_initial_stock([("widget", 50), ("gadget", 50)]).unwrap();

    thread::scope(|s| {
        for item in ["widget", "gadget"] {
            for _ in 0..4 {
                let ledger = &ledger;
                s.spawn(move || {
                    for _ in 0..25 {
                        let _ = ledger.reserve(item, 1).unwrap();
                    }
                });
            }
        }
    });

    assert_eq!(ledger.peek("widget"), 0);
    assert_eq!(ledger.peek("gadget"), 0);
}

#[test]
fn audit_stream_replays_to_final_stock() {
    let bus = Arc::new(InMemoryEventBus::<StockEnvelope>::new());
    let sub = bus.subscribe();
    let ledger = Arc::new(
        StockLedger::with_initial_stock([("widget", 20), ("ticket", 5)])
            .unwrap()
            .with_event_bus(Arc::clone(&bus)),
    );

    let workers: Vec<_> = (0..8)
        .map(|n| {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || {
                for i in 0..50 {
                    let item = if (n + i) % 2 == 0 { "widget" } else { "ticket" };
                    if i % 5 == 0 {
                        ledger.replenish(item, 3).unwrap();
                    } else {
                        let _ = ledger.reserve(item, 2).unwrap();
                    }
                }
            })
        })
        .collect();
    for w in workers {
        w.join().unwrap();
    }

    let mut streams: HashMap<String, Vec<StockEnvelope>> = HashMap::new();
    for env in sub.drain() {
        streams.entry(env.stream_id().to_string()).or_default().push(env);
    }

    for (item, initial) in [("widget", 20i128), ("ticket", 5i128)] {
        let mut stream = streams.remove(item).unwrap_or_default();
        stream.sort_by_key(|env| env.sequence_number());

        // Gap-free, 1-based sequence per item.
        for (expected, env) in (1u64..).zip(&stream) {
            assert_eq!(env.sequence_number(), expected);
        }

        let mut replayed = initial;
        for env in &stream {
            replayed += env.payload().delta();
            assert!(replayed >= 0);
            assert_eq!(replayed, i128::from(env.payload().on_hand_after()));
        }
        assert_eq!(replayed, i128::from(ledger.peek(item)));
    }
}
