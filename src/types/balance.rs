use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of atomic units in one whole coin.
pub const ATOMIC_UNITS_PER_COIN: u64 = 1_000_000;

/// Snapshot of a wallet's funds in atomic units.
///
/// A balance is never edited in place: every refresh replaces the whole value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Spendable funds
    pub available: u64,
    /// Funds waiting for confirmation or unlock
    pub locked: u64,
}

impl Balance {
    pub fn new(available: u64, locked: u64) -> Self {
        Self { available, locked }
    }

    pub fn total(&self) -> u64 {
        self.available.saturating_add(self.locked)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Available '{}', Locked '{}', Total '{}'",
            Amount(self.available),
            Amount(self.locked),
            Amount(self.total())
        )
    }
}

/// Human readable rendering of an atomic amount with six decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(pub u64);

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:06}",
            self.0 / ATOMIC_UNITS_PER_COIN,
            self.0 % ATOMIC_UNITS_PER_COIN
        )
    }
}
