use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::common::{Price, Quantity};

/// A single (price, resting quantity) pair on one side of the book
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct PriceLevel {
    pub price: Price,
    pub quantity: Quantity,
}

impl PriceLevel {
    pub fn new(price: Price, quantity: Quantity) -> Self {
        Self { price, quantity }
    }
}

/// End of a [`PriceLevelMap`] to read from
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Extreme {
    Min,
    Max,
}

/// What a call to [`PriceLevelMap::upsert`] did to the container
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Upsert {
    Inserted,
    Updated,
    Removed,
    /// Zero quantity for a price that was not resting
    Ignored,
}

/// Ordered mapping from price to resting quantity, iterated in ascending
/// price order. Invariant: no stored level has a zero quantity.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PriceLevelMap {
    levels: BTreeMap<Price, Quantity>,
}

impl PriceLevelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resting quantity at `price`, removing the level when
    /// `quantity` is zero.
    pub fn upsert(&mut self, price: Price, quantity: Quantity) -> Upsert {
        if quantity.is_zero() {
            return match self.levels.remove(&price) {
                Some(_) => Upsert::Removed,
                None => Upsert::Ignored,
            };
        }

        match self.levels.insert(price, quantity) {
            Some(_) => Upsert::Updated,
            None => Upsert::Inserted,
        }
    }

    /// The level at the lowest or highest price, if any
    pub fn peek_extreme(&self, end: Extreme) -> Option<PriceLevel> {
        let entry = match end {
            Extreme::Min => self.levels.first_key_value(),
            Extreme::Max => self.levels.last_key_value(),
        };
        entry.map(|(price, quantity)| PriceLevel::new(*price, *quantity))
    }

    pub fn get(&self, price: &Price) -> Option<Quantity> {
        self.levels.get(price).copied()
    }

    pub fn contains(&self, price: &Price) -> bool {
        self.levels.contains_key(price)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Iterates levels starting from the given end, i.e. `Extreme::Max`
    /// yields prices in descending order.
    pub fn iter_from(
        &self,
        end: Extreme,
    ) -> Box<dyn Iterator<Item = PriceLevel> + '_> {
        let levels = self
            .levels
            .iter()
            .map(|(price, quantity)| PriceLevel::new(*price, *quantity));
        match end {
            Extreme::Min => Box::new(levels),
            Extreme::Max => Box::new(levels.rev()),
        }
    }

    /// Sum of all resting quantity in the container, saturating at
    /// `Decimal::MAX`
    pub fn total_quantity(&self) -> Quantity {
        self.levels
            .values()
            .fold(Quantity::ZERO, |total, quantity| total.saturating_add(*quantity))
    }
}
