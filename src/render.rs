//! Plain-text top-of-book ladder.

use std::fmt::Display;

use crate::{book::BookView, common::Side, error::BookError, tick::Tick};

const PRICE_DP: usize = 2;
const QTY_DP: usize = 5;
const COL_WIDTH: usize = 12;

/// Bids and asks side by side, best prices on the first row, framed by a
/// header (symbol, mid, spread) and a footer (best bid and ask with sizes).
///
/// When no tick could be derived the header and footer report which side is
/// missing liquidity instead of prices.
pub struct Ladder<'a> {
    book: &'a dyn BookView,
    tick: Result<&'a Tick, BookError>,
    levels: usize,
}

impl<'a> Ladder<'a> {
    pub fn new(
        book: &'a dyn BookView,
        tick: Result<&'a Tick, BookError>,
        levels: usize,
    ) -> Self {
        Self { book, tick, levels }
    }
}

impl Display for Ladder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bids = self.book.top_n(Side::Bid, self.levels);
        let asks = self.book.top_n(Side::Ask, self.levels);

        match &self.tick {
            Ok(tick) => writeln!(
                f,
                "  {}   Mid: {:.PRICE_DP$}   Spread: {:.PRICE_DP$}",
                tick.symbol, tick.mid_price, tick.spread
            )?,
            Err(error) => writeln!(
                f,
                "  {}   waiting for liquidity ({error})",
                self.book.symbol()
            )?,
        }

        writeln!(
            f,
            "{:>COL_WIDTH$} {:>COL_WIDTH$} | {:<COL_WIDTH$} {:<COL_WIDTH$}",
            "Bid Qty", "Bid Price", "Ask Price", "Ask Qty"
        )?;

        for row in 0..bids.len().max(asks.len()) {
            let (bid_qty, bid_price) = match bids.get(row) {
                Some(level) => (
                    format!("{:.QTY_DP$}", level.quantity),
                    format!("{:.PRICE_DP$}", level.price),
                ),
                None => (String::new(), String::new()),
            };
            let (ask_price, ask_qty) = match asks.get(row) {
                Some(level) => (
                    format!("{:.PRICE_DP$}", level.price),
                    format!("{:.QTY_DP$}", level.quantity),
                ),
                None => (String::new(), String::new()),
            };
            writeln!(
                f,
                "{bid_qty:>COL_WIDTH$} {bid_price:>COL_WIDTH$} | {ask_price:<COL_WIDTH$} {ask_qty:<COL_WIDTH$}"
            )?;
        }

        if let Ok(tick) = &self.tick {
            writeln!(
                f,
                "  Best Bid: {:.PRICE_DP$} ({:.QTY_DP$})   |   Best Ask: {:.PRICE_DP$} ({:.QTY_DP$})",
                tick.bid, tick.bid_qty, tick.ask, tick.ask_qty
            )?;
        }

        Ok(())
    }
}
