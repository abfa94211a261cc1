use crate::errors::LedgerError;
use schema::{Context, ContextWeights};
use serde::{Deserialize, Serialize};

/// Cumulative pull counts per machine plus a grand total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PullLedger {
    total: u64,
    by_context: ContextWeights<u64>,
}

impl PullLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` pulls to `context` and to the total. `count` must be at least 1.
    pub fn record(&mut self, context: Context, count: u64) -> Result<(), LedgerError> {
        if count == 0 {
            return Err(LedgerError::ZeroPullCount { context });
        }
        *self.by_context.get_mut(context) += count;
        self.total += count;
        Ok(())
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn by_context(&self, context: Context) -> u64 {
        self.by_context.get(context)
    }

    /// Adds pulls to the grand total that no machine is credited with, as in
    /// saves written before per-machine counts existed.
    pub fn with_untracked_total(mut self, pulls: u64) -> Self {
        self.total += pulls;
        self
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
