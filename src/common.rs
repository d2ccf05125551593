use std::fmt::Display;

use arbitrary::Arbitrary;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Exact decimal price; never a binary float so that equal ticks stay equal
pub type Price = Decimal;

/// Resting size at a price level; zero means "level withdrawn"
pub type Quantity = Decimal;

#[derive(
    Arbitrary, Copy, Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Bid,
    Ask,
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Bid => write!(f, "bid"),
            Side::Ask => write!(f, "ask"),
        }
    }
}

/// Price halfway between `a` and `b`.
///
/// Computed as `a + (b - a) / 2`, which cannot overflow for positive prices.
/// Exact unless the half-difference needs more than 28 decimal places, in
/// which case it is rounded to 28 places.
pub fn midpoint(a: Price, b: Price) -> Price {
    a + (b - a) / Decimal::TWO
}
