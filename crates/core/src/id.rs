//! Strongly-typed item identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// Identifier of a stocked item (e.g. `"widget"`, `"ticket"`).
///
/// Always non-empty. Any other text is taken verbatim, whitespace included.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::invalid_argument("item id cannot be empty"));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for ItemId {}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl core::borrow::Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ItemId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for ItemId {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for ItemId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemId> for String {
    fn from(value: ItemId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_only_the_empty_id() {
        assert!(matches!(ItemId::new(""), Err(DomainError::InvalidArgument(_))));
        assert!(matches!("".parse::<ItemId>(), Err(DomainError::InvalidArgument(_))));

        let blank = "   ".parse::<ItemId>().unwrap();
        assert_eq!(blank.as_str(), "   ");
    }

    #[test]
    fn keeps_text_verbatim() {
        let id = ItemId::new("widget").unwrap();
        assert_eq!(id.as_str(), "widget");
        assert_eq!(id.to_string(), "widget");
    }

    #[test]
    fn serde_is_transparent_and_validating() {
        let id = ItemId::new("ticket").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ticket\"");

        let back: ItemId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<ItemId>("\"\"").is_err());
    }

    #[test]
    fn borrows_as_str_for_map_lookups() {
        let mut map = std::collections::HashMap::new();
        map.insert(ItemId::new("widget").unwrap(), 3u64);
        assert_eq!(map.get("widget"), Some(&3));
    }
}
