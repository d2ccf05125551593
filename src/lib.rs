//! Incremental L2 order book maintenance and top-of-book tick derivation.
//!
//! A feed hands [`book::OrderBook::apply_update`] batches of absolute
//! `(price, quantity)` deltas per side; [`tick::derive`] then reads the
//! post-update state and produces an immutable [`tick::Tick`].
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use ticklobe::{book::OrderBook, tick};
//!
//! let mut book = OrderBook::new("BTCUSDT");
//! book.apply_update(
//!     &[(Decimal::new(10000, 2), Decimal::new(15, 1))],
//!     &[(Decimal::new(10050, 2), Decimal::ONE)],
//! );
//!
//! let tick = tick::derive(&book).unwrap();
//! assert_eq!(tick.mid_price, Decimal::new(10025, 2));
//! assert_eq!(tick.spread, Decimal::new(50, 2));
//! ```

pub mod book;
pub mod common;
pub mod delta;
pub mod error;
pub mod feed;
pub mod render;
pub mod report;
pub mod shared;
pub mod tick;
