//! Strictly positive quantities requested by callers.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// A positive amount of stock to reserve or replenish.
///
/// Callers hand over plain signed integers parsed from requests; zero and
/// negative values are rejected here so the ledger only ever sees amounts it
/// can act on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct Quantity(u64);

impl Quantity {
    pub fn new(raw: i64) -> Result<Self, DomainError> {
        if raw <= 0 {
            return Err(DomainError::invalid_argument(format!(
                "quantity must be positive (got {raw})"
            )));
        }
        Ok(Self(raw.unsigned_abs()))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl ValueObject for Quantity {}

impl TryFrom<i64> for Quantity {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u64 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_and_negative_are_invalid() {
        assert!(matches!(Quantity::new(0), Err(DomainError::InvalidArgument(_))));
        assert!(matches!(Quantity::new(-5), Err(DomainError::InvalidArgument(_))));
        assert!(Quantity::new(i64::MIN).is_err());
    }

    #[test]
    fn positive_is_kept() {
        assert_eq!(Quantity::new(7).unwrap().get(), 7);
        assert_eq!(Quantity::new(i64::MAX).unwrap().get(), i64::MAX as u64);
    }

    proptest! {
        #[test]
        fn accepts_exactly_the_positive_range(raw in any::<i64>()) {
            let parsed = Quantity::new(raw);
            prop_assert_eq!(parsed.is_ok(), raw > 0);
            if let Ok(q) = parsed {
                prop_assert_eq!(q.get() as i128, raw as i128);
            }
        }
    }
}
