//! Top-of-book snapshots derived from a book.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    book::BookView,
    common::{midpoint, Price, Quantity},
    error::BookError,
};

/// Immutable top-of-book summary at one point in time.
///
/// `last_price`, `event_time` and `volume` are never derived from the book;
/// they stay `None` unless a trade or feed source supplies them.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Tick {
    pub symbol: String,
    pub bid: Price,
    pub bid_qty: Quantity,
    pub ask: Price,
    pub ask_qty: Quantity,
    pub mid_price: Price,
    pub spread: Price,
    pub last_price: Option<Price>,
    pub event_time: Option<DateTime<Utc>>,
    pub volume: Option<Quantity>,
}

impl Tick {
    /// Stamps the exchange time of the message this tick reflects
    pub fn with_event_time(self, event_time: DateTime<Utc>) -> Self {
        Self {
            event_time: Some(event_time),
            ..self
        }
    }

    /// Spread relative to the mid price, in basis points
    pub fn spread_bps(&self) -> Option<Decimal> {
        self.spread
            .checked_div(self.mid_price)?
            .checked_mul(Decimal::from(10_000))
    }

    pub fn is_crossed(&self) -> bool {
        self.bid >= self.ask
    }
}

/// Summarises the current best bid and ask of `book`.
///
/// Fails with [`BookError::EmptySide`] instead of inventing prices when
/// either side has no liquidity. The mid price is rounded to 28 decimal
/// places when it cannot be represented exactly (see [`midpoint`]).
pub fn derive<B>(book: &B) -> Result<Tick, BookError>
where
    B: BookView + ?Sized,
{
    let bid = book.best_bid()?;
    let ask = book.best_ask()?;

    Ok(Tick {
        symbol: book.symbol().to_string(),
        bid: bid.price,
        bid_qty: bid.quantity,
        ask: ask.price,
        ask_qty: ask.quantity,
        mid_price: midpoint(bid.price, ask.price),
        spread: ask.price - bid.price,
        last_price: None,
        event_time: None,
        volume: None,
    })
}
