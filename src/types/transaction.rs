use serde::{Deserialize, Serialize};
use std::fmt;
use super::Amount;

/// One line item of a standard transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Address receiving the funds
    pub address: String,
    /// Amount in atomic units, always greater than zero
    pub amount: u64,
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to '{}'", Amount(self.amount), self.address)
    }
}

/// An ordinary transfer of funds to one or more destinations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardTransaction {
    /// Destinations and amounts, never empty
    pub transfers: Vec<Transfer>,
    /// Number of decoy inputs mixed into the transaction
    pub anonymity: u16,
    /// Fee paid to the network in atomic units
    pub fee: u64,
    /// Height or timestamp before which the outputs cannot be spent
    pub unlock_time: u64,
}

impl StandardTransaction {
    /// Sum of the fee and every transfer amount.
    pub fn total_cost(&self) -> u64 {
        self.transfers
            .iter()
            .fold(self.fee, |total, transfer| total.saturating_add(transfer.amount))
    }
}

impl fmt::Display for StandardTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\n\tFee: {}\n\tAnonymity: {}\n\tTransfers:",
            Amount(self.fee),
            self.anonymity
        )?;
        for transfer in &self.transfers {
            write!(f, "\n\t\t{}", transfer)?;
        }
        Ok(())
    }
}

/// A consolidation transaction merging outputs below `threshold`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusionTransaction {
    /// Dust threshold in atomic units, always greater than zero
    pub threshold: u64,
    pub anonymity: u16,
}

impl fmt::Display for FusionTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\n\tDustThreshold: {}\n\tAnonymity: {}",
            Amount(self.threshold),
            self.anonymity
        )
    }
}

/// Kind of transaction produced for a simulation round
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Standard,
    Fusion,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Standard => write!(f, "Transaction"),
            TransactionKind::Fusion => write!(f, "Fusion Transaction"),
        }
    }
}
