use serde::{Deserialize, Serialize};

/// Business outcome of [`StockLedger::reserve`](crate::StockLedger::reserve).
///
/// Running out of stock is an expected result, not an error, so it is a
/// variant here rather than a `DomainError`.
#[must_use = "an Insufficient reservation means nothing was taken from stock"]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Reservation {
    /// Stock was decremented; `remaining` is the count left afterwards.
    Reserved { remaining: u64 },
    /// Stock was left untouched; `available` is what was on hand at the time.
    Insufficient { available: u64 },
}

impl Reservation {
    pub fn is_reserved(&self) -> bool {
        matches!(self, Reservation::Reserved { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_outcome_tag() {
        let json = serde_json::to_value(Reservation::Insufficient { available: 3 }).unwrap();
        assert_eq!(json, serde_json::json!({ "outcome": "insufficient", "available": 3 }));

        let json = serde_json::to_value(Reservation::Reserved { remaining: 0 }).unwrap();
        assert_eq!(json["outcome"], "reserved");
    }
}
