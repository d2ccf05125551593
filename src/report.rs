//! Outcome of applying one update batch to a book.

use std::fmt::Display;

use crate::{book::Upsert, common::Side, error::DeltaError};

/// A delta that was not applied, located by side and position in its batch.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rejection {
    pub side: Side,
    pub index: usize,
    pub error: DeltaError,
}

impl Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} delta #{}: {}", self.side, self.index, self.error)
    }
}

/// Counters and diagnostics for one call to
/// [`OrderBook::apply_update`](crate::book::OrderBook::apply_update).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UpdateReport {
    pub inserted: usize,
    pub updated: usize,
    pub removed: usize,
    /// Zero-quantity deltas for prices that were not resting
    pub ignored: usize,
    pub rejected: Vec<Rejection>,
    /// Whether the best bid or best ask (price or size) differs from before
    /// the batch
    pub top_changed: bool,
}

impl UpdateReport {
    pub fn record(&mut self, outcome: Upsert) {
        match outcome {
            Upsert::Inserted => self.inserted += 1,
            Upsert::Updated => self.updated += 1,
            Upsert::Removed => self.removed += 1,
            Upsert::Ignored => self.ignored += 1,
        }
    }

    /// Number of deltas that passed validation
    pub fn applied(&self) -> usize {
        self.inserted + self.updated + self.removed + self.ignored
    }

    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}
