use rand::Rng;
use walletsim::types::Balance;
use crate::config::SelectionPolicy;

// ------------------------------------------------------------------------------------------------
// Wallet Snapshot
// ------------------------------------------------------------------------------------------------

/// Read-only view of one pool wallet as seen at the start of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletView<'a> {
    pub address: &'a str,
    pub balance: Balance,
}

impl<'a> WalletView<'a> {
    pub fn new(address: &'a str, balance: Balance) -> Self {
        Self { address, balance }
    }
}

// ------------------------------------------------------------------------------------------------
// Account Selection
// ------------------------------------------------------------------------------------------------

/// Picks the wallets taking part in a round, by pool index
#[derive(Debug, Clone, Copy)]
pub struct AccountSelector {
    policy: SelectionPolicy,
}

impl AccountSelector {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self { policy }
    }

    /// Selects the `(sender, receiver)` pair of a standard transaction.
    ///
    /// Returns `None` when the pool holds fewer than two wallets.
    pub fn select_pair<R: Rng + ?Sized>(
        &self,
        wallets: &[WalletView<'_>],
        rng: &mut R,
    ) -> Option<(usize, usize)> {
        if wallets.len() < 2 {
            return None;
        }
        let pair = match self.policy {
            SelectionPolicy::Ranked => select_ranked(wallets),
            SelectionPolicy::Random => {
                let sender = rng.gen_range(0..wallets.len());
                let mut receiver = rng.gen_range(0..wallets.len() - 1);
                if receiver >= sender {
                    receiver += 1;
                }
                (sender, receiver)
            }
        };
        tracing::debug!(
            sender = pair.0,
            receiver = pair.1,
            policy = ?self.policy,
            "Selected wallets"
        );
        Some(pair)
    }

    /// Selects the wallet consolidating its outputs, uniformly over the pool.
    pub fn select_fusion_wallet<R: Rng + ?Sized>(
        &self,
        wallets: &[WalletView<'_>],
        rng: &mut R,
    ) -> Option<usize> {
        if wallets.is_empty() {
            return None;
        }
        Some(rng.gen_range(0..wallets.len()))
    }
}

/// Richest wallet first in pool order sends to the poorest wallet last in pool order.
fn select_ranked(wallets: &[WalletView<'_>]) -> (usize, usize) {
    let mut sender = 0;
    let mut receiver = 0;
    for (index, wallet) in wallets.iter().enumerate() {
        if wallet.balance.available > wallets[sender].balance.available {
            sender = index;
        }
        if wallet.balance.available <= wallets[receiver].balance.available {
            receiver = index;
        }
    }
    (sender, receiver)
}
