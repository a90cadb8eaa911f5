//! Ledger configuration (initial stock seeding).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable holding a JSON [`LedgerConfig`].
pub const INITIAL_STOCK_ENV: &str = "STOCKLEDGER_INITIAL_STOCK";

/// Startup configuration for a [`StockLedger`](crate::StockLedger).
///
/// ```json
/// { "initial_stock": { "widget": 10, "ticket": 100 } }
/// ```
///
/// Counts are signed so that a bad seed is reported by the ledger as an
/// invalid argument instead of failing deep inside JSON parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    pub initial_stock: BTreeMap<String, i64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse ledger config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid ledger config: {0}")]
    Invalid(#[from] stockledger_core::DomainError),
}

impl LedgerConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Load from `STOCKLEDGER_INITIAL_STOCK`, falling back to an empty ledger.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(INITIAL_STOCK_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Self::from_json_str(&raw),
            _ => {
                tracing::debug!(env = INITIAL_STOCK_ENV, "no initial stock configured");
                Ok(Self::default())
            }
        }
    }

    pub fn with_item(mut self, item: impl Into<String>, quantity: i64) -> Self {
        self.initial_stock.insert(item.into(), quantity);
        self
    }
}
