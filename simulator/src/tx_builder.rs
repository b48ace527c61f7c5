//! Builds the transaction of a round from the current wallet snapshot.
//! Pure: no I/O, all randomness comes from the caller's RNG.

use rand::Rng;
use std::ops::RangeInclusive;
use walletsim::types::{FusionTransaction, StandardTransaction, TransactionKind, Transfer};
use crate::account_selector::{AccountSelector, WalletView};
use crate::config::Config;

// ------------------------------------------------------------------------------------------------
// Bounds and Plans
// ------------------------------------------------------------------------------------------------

/// Inclusive ranges every generated transaction is drawn from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionBounds {
    pub fee: RangeInclusive<u64>,
    pub amount: RangeInclusive<u64>,
    pub anonymity: RangeInclusive<u16>,
    pub fusion_threshold: RangeInclusive<u64>,
    pub unlock_time: u64,
}

impl From<&Config> for TransactionBounds {
    fn from(config: &Config) -> Self {
        Self {
            fee: config.fee_range(),
            amount: config.amount_range(),
            anonymity: config.anonymity_range(),
            fusion_threshold: config.fusion_threshold_range(),
            unlock_time: config.unlock_time,
        }
    }
}

/// A standard transaction from `sender` to `receiver`, both pool indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardPlan {
    pub sender: usize,
    pub receiver: usize,
    pub transaction: StandardTransaction,
}

/// A fusion transaction submitted by `wallet`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FusionPlan {
    pub wallet: usize,
    pub transaction: FusionTransaction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundPlan {
    Standard(StandardPlan),
    Fusion(FusionPlan),
}

// ------------------------------------------------------------------------------------------------
// Transaction Builder
// ------------------------------------------------------------------------------------------------

pub struct TransactionBuilder {
    bounds: TransactionBounds,
    selector: AccountSelector,
    /// Percentage of rounds that send a fusion transaction
    fusion_probability: u32,
}

impl TransactionBuilder {
    pub fn new(
        bounds: TransactionBounds,
        selector: AccountSelector,
        fusion_probability: u32,
    ) -> Self {
        Self {
            bounds,
            selector,
            fusion_probability,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            TransactionBounds::from(config),
            AccountSelector::new(config.selection_policy),
            config.fusion_probability,
        )
    }

    /// Draws `u` in `0..=99`; the round is a fusion round when `u < fusion_probability`.
    pub fn decide_round<R: Rng + ?Sized>(&self, rng: &mut R) -> TransactionKind {
        if rng.gen_range(0..100) < self.fusion_probability {
            TransactionKind::Fusion
        } else {
            TransactionKind::Standard
        }
    }

    pub fn build_standard<R: Rng + ?Sized>(
        &self,
        wallets: &[WalletView<'_>],
        rng: &mut R,
    ) -> Option<StandardPlan> {
        let (sender, receiver) = self.selector.select_pair(wallets, rng)?;
        let fee = rng.gen_range(self.bounds.fee.clone());
        let anonymity = rng.gen_range(self.bounds.anonymity.clone());
        let amount = rng.gen_range(self.bounds.amount.clone());
        Some(StandardPlan {
            sender,
            receiver,
            transaction: StandardTransaction {
                transfers: vec![Transfer {
                    address: wallets[receiver].address.to_string(),
                    amount,
                }],
                anonymity,
                fee,
                unlock_time: self.bounds.unlock_time,
            },
        })
    }

    pub fn build_fusion<R: Rng + ?Sized>(
        &self,
        wallets: &[WalletView<'_>],
        rng: &mut R,
    ) -> Option<FusionPlan> {
        let wallet = self.selector.select_fusion_wallet(wallets, rng)?;
        Some(FusionPlan {
            wallet,
            transaction: FusionTransaction {
                threshold: rng.gen_range(self.bounds.fusion_threshold.clone()),
                anonymity: rng.gen_range(self.bounds.anonymity.clone()),
            },
        })
    }

    /// Decides the round type and builds its transaction.
    pub fn plan_round<R: Rng + ?Sized>(
        &self,
        wallets: &[WalletView<'_>],
        rng: &mut R,
    ) -> Option<RoundPlan> {
        match self.decide_round(rng) {
            TransactionKind::Standard => self.build_standard(wallets, rng).map(RoundPlan::Standard),
            TransactionKind::Fusion => self.build_fusion(wallets, rng).map(RoundPlan::Fusion),
        }
    }
}
