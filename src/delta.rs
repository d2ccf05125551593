//! Conversion and validation of incoming `(price, quantity)` deltas.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::common::{Price, Quantity};
use crate::error::DeltaError;

/// Absolute resting size for one price on one side.
pub type Delta = (Price, Quantity);

/// Checks the named invariants of a delta, price first.
pub fn validate(price: Price, quantity: Quantity) -> Result<(), DeltaError> {
    if price <= Decimal::ZERO {
        return Err(DeltaError::NonPositivePrice(price));
    }
    if quantity.is_sign_negative() && !quantity.is_zero() {
        return Err(DeltaError::NegativeQuantity(quantity));
    }
    Ok(())
}

/// Reads one decimal field as sent by exchanges (`"100.50"`, `"1e-3"`).
fn parse_decimal(field: &'static str, input: &str) -> Result<Decimal, DeltaError> {
    let trimmed = input.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| DeltaError::Unparseable {
            field,
            input: input.to_string(),
        })
}

/// Parses and validates a delta given as decimal strings.
pub fn parse(price: &str, quantity: &str) -> Result<Delta, DeltaError> {
    let price = parse_decimal("price", price)?;
    let quantity = parse_decimal("quantity", quantity)?;
    validate(price, quantity)?;
    Ok((price, quantity))
}
