pub mod levels;
pub mod order_book;

pub use levels::{Extreme, PriceLevel, PriceLevelMap, Upsert};
pub use order_book::OrderBook;

use crate::{
    common::{midpoint, Price, Quantity, Side},
    error::BookError,
};

/// Read-only queries over a limit order book.
///
/// This is the only handle a renderer or strategy is given; nothing reachable
/// through it can mutate the book.
pub trait BookView {
    fn symbol(&self) -> &str;

    /// Highest resting bid
    fn best_bid(&self) -> Result<PriceLevel, BookError>;

    /// Lowest resting ask
    fn best_ask(&self) -> Result<PriceLevel, BookError>;

    /// Up to `n` levels of `side`, best first
    fn top_n(&self, side: Side, n: usize) -> Vec<PriceLevel>;

    /// Number of price levels resting on `side`
    fn levels(&self, side: Side) -> usize;

    /// Total resting quantity on each side, as `(bids, asks)`
    fn depth(&self) -> (Quantity, Quantity);

    /// Best ask minus best bid. Negative when the book is crossed.
    fn spread(&self) -> Result<Price, BookError> {
        let bid = self.best_bid()?;
        let ask = self.best_ask()?;
        Ok(ask.price - bid.price)
    }

    fn mid_price(&self) -> Result<Price, BookError> {
        let bid = self.best_bid()?;
        let ask = self.best_ask()?;
        Ok(midpoint(bid.price, ask.price))
    }

    fn top(&self) -> (Option<PriceLevel>, Option<PriceLevel>) {
        (self.best_bid().ok(), self.best_ask().ok())
    }

    fn is_crossed(&self) -> bool {
        match self.top() {
            (Some(bid), Some(ask)) => bid.price >= ask.price,
            _ => false,
        }
    }
}
