//! Error types returned by the book, the delta validator and tick derivation.

use thiserror::Error;

use crate::common::{Price, Quantity, Side};

/// Failure of a query that needs liquidity on a side of the book.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum BookError {
    /// The named side holds no levels.
    #[error("no liquidity on {0} side")]
    EmptySide(Side),
}

/// Reason a single `(price, quantity)` delta was rejected.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DeltaError {
    /// Input could not be read as an exact decimal (includes `NaN`/`inf`).
    #[error("unparseable {field}: {input:?}")]
    Unparseable { field: &'static str, input: String },

    /// Prices must be strictly positive.
    #[error("non-positive price: {0}")]
    NonPositivePrice(Price),

    /// Resting sizes are never negative; zero is the removal sentinel.
    #[error("negative quantity: {0}")]
    NegativeQuantity(Quantity),
}

/// A feed message that could not be decoded at all.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("malformed feed message: {0}")]
    Json(#[from] serde_json::Error),
}
