//! Single-writer, many-reader access to one book across threads.
//!
//! [`SharedBook`] is the only handle that can change the book. It is not
//! `Clone` and its mutating methods take `&mut self`, so a batch is always
//! applied by one writer. [`BookReader`]s see the book only through
//! [`BookView`], each query under one read lock, so a reader never observes
//! part of a batch.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::{
    book::{BookView, OrderBook, PriceLevel},
    common::{Price, Side},
    delta::Delta,
    error::BookError,
    report::UpdateReport,
    tick::{self, Tick},
};

#[derive(Debug)]
pub struct SharedBook {
    inner: Arc<RwLock<OrderBook>>,
}

impl SharedBook {
    pub fn new(book: OrderBook) -> Self {
        Self {
            inner: Arc::new(RwLock::new(book)),
        }
    }

    pub fn apply_update(&mut self, bids: &[Delta], asks: &[Delta]) -> UpdateReport {
        self.inner.write().apply_update(bids, asks)
    }

    /// Applies a batch and derives the resulting tick in one critical
    /// section, so the tick reflects exactly this batch.
    pub fn apply_and_derive(
        &mut self,
        bids: &[Delta],
        asks: &[Delta],
    ) -> (UpdateReport, Result<Tick, BookError>) {
        let mut book = self.inner.write();
        let report = book.apply_update(bids, asks);
        let tick = tick::derive(&*book);
        (report, tick)
    }

    /// A read-only handle onto this book
    pub fn reader(&self) -> BookReader {
        BookReader {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[derive(Clone, Debug)]
pub struct BookReader {
    inner: Arc<RwLock<OrderBook>>,
}

impl BookReader {
    /// Runs `f` against a consistent view of the book
    pub fn view<R>(&self, f: impl FnOnce(&dyn BookView) -> R) -> R {
        let book = self.inner.read();
        f(&*book)
    }

    pub fn symbol(&self) -> String {
        self.view(|book| book.symbol().to_string())
    }

    pub fn tick(&self) -> Result<Tick, BookError> {
        self.view(|book| tick::derive(book))
    }

    pub fn best_bid(&self) -> Result<PriceLevel, BookError> {
        self.view(|book| book.best_bid())
    }

    pub fn best_ask(&self) -> Result<PriceLevel, BookError> {
        self.view(|book| book.best_ask())
    }

    pub fn spread(&self) -> Result<Price, BookError> {
        self.view(|book| book.spread())
    }

    pub fn top_n(&self, side: Side, n: usize) -> Vec<PriceLevel> {
        self.view(|book| book.top_n(side, n))
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_reader_sees_applied_batch() {
        let mut shared = SharedBook::new(OrderBook::new("BTCUSDT"));
        let reader = shared.reader();

        assert_eq!(reader.tick(), Err(BookError::EmptySide(Side::Bid)));

        let (report, tick) = shared.apply_and_derive(
            &[(dec!(100.00), dec!(1.5)), (dec!(99.50), dec!(2.0))],
            &[(dec!(100.50), dec!(1.0)), (dec!(101.00), dec!(3.0))],
        );

        assert_eq!(report.inserted, 4);
        let tick = tick.unwrap();
        assert_eq!(tick.mid_price, dec!(100.25));
        assert_eq!(reader.tick(), Ok(tick));
        assert_eq!(reader.symbol(), "BTCUSDT");
        assert_eq!(reader.spread(), Ok(dec!(0.50)));
        assert_eq!(reader.top_n(Side::Bid, 10).len(), 2);
    }

    #[test]
    fn test_apply_update() {
        let mut shared = SharedBook::new(OrderBook::new("ETHUSDT"));
        let reader = shared.reader();

        shared.apply_update(&[(dec!(10), dec!(1))], &[]);
        assert_eq!(reader.best_bid(), Ok(PriceLevel::new(dec!(10), dec!(1))));
        assert_eq!(reader.best_ask(), Err(BookError::EmptySide(Side::Ask)));
    }

    /// Every batch moves both sides to the same size; a reader that ever
    /// sees differing sizes has observed half a batch.
    #[test]
    fn test_readers_never_see_partial_batches() {
        const BATCHES: i64 = 2_000;

        let mut shared = SharedBook::new(OrderBook::new("BTCUSDT"));
        shared.apply_update(&[(dec!(100), dec!(1))], &[(dec!(101), dec!(1))]);
        let readers: Vec<BookReader> = (0..4).map(|_| shared.reader()).collect();

        thread::scope(|scope| {
            for reader in &readers {
                scope.spawn(move || {
                    let mut last_seen = Decimal::ZERO;
                    for _ in 0..BATCHES {
                        let tick = reader.tick().unwrap();
                        assert_eq!(tick.bid_qty, tick.ask_qty);
                        assert!(tick.bid_qty >= last_seen);
                        last_seen = tick.bid_qty;
                    }
                });
            }

            for size in 2..=BATCHES {
                let size = Decimal::from(size);
                shared.apply_update(
                    &[(dec!(100), size), (dec!(99), size)],
                    &[(dec!(101), size), (dec!(102), size)],
                );
            }
        });

        assert_eq!(
            readers[0].best_bid(),
            Ok(PriceLevel::new(dec!(100), Decimal::from(BATCHES)))
        );
    }
}
