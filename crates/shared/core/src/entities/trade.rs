use serde::{Deserialize, Serialize};
use std::fmt;

use crate::values::FixedDecimal;

/// Direction of a trade candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Long: the faster line crossed above the slower line
    Up,
    /// Short: the faster line crossed below the slower line
    Down,
    /// No crossover
    #[default]
    Flat,
}

impl Direction {
    pub fn is_flat(&self) -> bool {
        matches!(self, Direction::Flat)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Flat => "Flat",
        };
        f.write_str(s)
    }
}

/// Trade candidate produced by one signal-generation cycle
///
/// A fresh value every cycle; the order-placement layer consumes and drops it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub direction: Direction,
    pub entry_price: FixedDecimal,
    pub stop_loss_price: FixedDecimal,
    /// The crossover survived every configured filter
    pub tradable: bool,
}

impl Trade {
    /// No crossover this cycle
    pub fn flat() -> Self {
        Self {
            direction: Direction::Flat,
            entry_price: FixedDecimal::ZERO,
            stop_loss_price: FixedDecimal::ZERO,
            tradable: false,
        }
    }

    /// A crossover that a filter turned down
    pub fn rejected(direction: Direction) -> Self {
        Self {
            direction,
            ..Self::flat()
        }
    }

    /// A crossover that passed every filter
    pub fn tradable(
        direction: Direction,
        entry_price: FixedDecimal,
        stop_loss_price: FixedDecimal,
    ) -> Self {
        Self {
            direction,
            entry_price,
            stop_loss_price,
            tradable: true,
        }
    }

    /// Distance between entry and stop-loss
    pub fn risk(&self) -> FixedDecimal {
        (self.entry_price - self.stop_loss_price).abs()
    }
}

impl Default for Trade {
    fn default() -> Self {
        Self::flat()
    }
}
