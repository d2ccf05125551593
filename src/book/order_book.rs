use tracing::{debug, trace, warn};

use crate::{
    common::{Quantity, Side},
    delta::{self, Delta},
    error::BookError,
    report::{Rejection, UpdateReport},
};

use super::{BookView, Extreme, PriceLevel, PriceLevelMap};

/// The end of a side's map holding that side's best price
fn best_end(side: Side) -> Extreme {
    match side {
        Side::Bid => Extreme::Max,
        Side::Ask => Extreme::Min,
    }
}

/// Aggregated (L2) limit order book for a single symbol.
///
/// Both sides are ordered by ascending price; the best bid is the maximum of
/// `bids` and the best ask the minimum of `asks`. A crossed book is
/// representable and is never rejected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderBook {
    symbol: String,
    bids: PriceLevelMap,
    asks: PriceLevelMap,
}

impl OrderBook {
    /// Creates an empty book for `symbol`
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bids: PriceLevelMap::new(),
            asks: PriceLevelMap::new(),
        }
    }

    /// Applies a batch of absolute-size deltas, bids first, each side in the
    /// order given. A repeated price within the batch resolves to its last
    /// delta. Malformed deltas are skipped and reported; the rest of the
    /// batch is still applied.
    pub fn apply_update(&mut self, bids: &[Delta], asks: &[Delta]) -> UpdateReport {
        let before = self.top();
        let mut report = UpdateReport::default();

        self.apply_side(Side::Bid, bids, &mut report);
        self.apply_side(Side::Ask, asks, &mut report);

        let after = self.top();
        report.top_changed = before != after;

        if report.top_changed {
            debug!(
                symbol = %self.symbol,
                bid = ?after.0.map(|l| l.price),
                ask = ?after.1.map(|l| l.price),
                "top of book changed"
            );
        }
        trace!(
            symbol = %self.symbol,
            inserted = report.inserted,
            updated = report.updated,
            removed = report.removed,
            rejected = report.rejected.len(),
            "applied update"
        );

        report
    }

    fn apply_side(&mut self, side: Side, deltas: &[Delta], report: &mut UpdateReport) {
        let levels = match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        };

        for (index, &(price, quantity)) in deltas.iter().enumerate() {
            if let Err(error) = delta::validate(price, quantity) {
                warn!(
                    symbol = %self.symbol,
                    %side,
                    index,
                    %error,
                    "rejected delta"
                );
                report.rejected.push(Rejection { side, index, error });
                continue;
            }
            report.record(levels.upsert(price, quantity));
        }
    }

    /// The price-ordered levels of one side
    pub fn side(&self, side: Side) -> &PriceLevelMap {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    /// The level `rank` places away from the best price of `side` (rank 0 is
    /// the best level). Linear in `rank`.
    pub fn level(&self, side: Side, rank: usize) -> Option<PriceLevel> {
        self.side(side).iter_from(best_end(side)).nth(rank)
    }

    fn best(&self, side: Side) -> Result<PriceLevel, BookError> {
        self.side(side)
            .peek_extreme(best_end(side))
            .ok_or(BookError::EmptySide(side))
    }
}

impl BookView for OrderBook {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn best_bid(&self) -> Result<PriceLevel, BookError> {
        self.best(Side::Bid)
    }

    fn best_ask(&self) -> Result<PriceLevel, BookError> {
        self.best(Side::Ask)
    }

    fn top_n(&self, side: Side, n: usize) -> Vec<PriceLevel> {
        self.side(side).iter_from(best_end(side)).take(n).collect()
    }

    fn levels(&self, side: Side) -> usize {
        self.side(side).len()
    }

    fn depth(&self) -> (Quantity, Quantity) {
        (self.bids.total_quantity(), self.asks.total_quantity())
    }
}
