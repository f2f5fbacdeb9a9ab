use serde::{Deserialize, Serialize};
use std::fmt;

use crate::values::FixedDecimal;

/// A (relative time, price) coordinate
///
/// `time` is a position ordinal inside a trailing window (1 = oldest of the
/// window), not wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub time: u32,
    pub price: FixedDecimal,
}

impl Point {
    /// Ordinal carried by computed points that have no window position
    pub const UNPLACED: u32 = 0;

    pub fn new(time: u32, price: FixedDecimal) -> Self {
        Self { time, price }
    }

    /// A computed point that only carries a price
    pub fn unplaced(price: FixedDecimal) -> Self {
        Self {
            time: Self::UNPLACED,
            price,
        }
    }

    /// Time ordinal as a decimal x coordinate
    pub fn x(&self) -> FixedDecimal {
        FixedDecimal::from(self.time)
    }

    /// Price as the y coordinate
    pub fn y(&self) -> FixedDecimal {
        self.price
    }

    /// Build points for a trailing window of values, oldest first, ordinals from 1
    pub fn from_values(values: &[FixedDecimal]) -> Vec<Point> {
        values
            .iter()
            .zip(1u32..)
            .map(|(price, time)| Point::new(time, *price))
            .collect()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.time, self.price)
    }
}
