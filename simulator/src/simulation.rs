//! The simulation engine: one transaction per round, paced to the configured rate.

use std::fmt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use walletsim::types::{Amount, TransactionKind};
use walletsim::{Wallet, WalletError, WalletService};
use crate::account_selector::WalletView;
use crate::config::{Config, ConfigError};
use crate::pacing::Pacer;
use crate::stats::SimulatorStats;
use crate::tx_builder::{FusionPlan, RoundPlan, StandardPlan, TransactionBuilder};

// ------------------------------------------------------------------------------------------------
// Round Outcomes and Errors
// ------------------------------------------------------------------------------------------------

/// A standard round whose sender could not cover the transaction cost
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortfall {
    /// Pool index of the sender
    pub wallet: usize,
    /// Fee plus every transfer amount
    pub required: u64,
    /// Sender's cached available balance
    pub available: u64,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Not enough balance. Required: {} Available: {} ({} < {} atomic units)",
            Amount(self.required),
            Amount(self.available),
            self.available,
            self.required
        )
    }
}

/// What a single round did
#[derive(Debug)]
pub enum RoundOutcome {
    /// `wallet` submitted a transaction and the service returned its hash
    Submitted {
        kind: TransactionKind,
        wallet: usize,
        hash: String,
    },
    /// The wallet service refused the transaction or answered with a body that is not JSON
    Rejected {
        kind: TransactionKind,
        wallet: usize,
        error: WalletError,
    },
    /// Nothing was submitted
    Skipped(Shortfall),
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to initialize {wallet}: {source}")]
    Initialization {
        wallet: String,
        #[source]
        source: WalletError,
    },
    #[error("failed to refresh {wallet}: {source}")]
    Refresh {
        wallet: String,
        #[source]
        source: WalletError,
    },
    #[error("failed to submit transaction: {source}")]
    Submission {
        #[source]
        source: WalletError,
    },
    #[error("The simulation expects at least 2 wallets, got {0}")]
    PoolTooSmall(usize),
}

// ------------------------------------------------------------------------------------------------
// Simulation Engine
// ------------------------------------------------------------------------------------------------

/// Drives the wallet pool: build, admit, submit, pace, refresh.
///
/// Rounds run strictly one after another and every RPC call is awaited before the next one.
pub struct Simulation<S> {
    wallets: Vec<Wallet<S>>,
    builder: TransactionBuilder,
    pacer: Pacer,
    rng: StdRng,
    stats: SimulatorStats,
}

impl<S: WalletService> Simulation<S> {
    /// Takes ownership of already initialized wallets.
    pub fn new(config: &Config, wallets: Vec<Wallet<S>>) -> Result<Self, SimulationError> {
        if wallets.len() < 2 {
            return Err(SimulationError::PoolTooSmall(wallets.len()));
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            wallets,
            builder: TransactionBuilder::from_config(config),
            pacer: Pacer::new(config.pacing, config.round_interval()),
            rng,
            stats: SimulatorStats::new(),
        })
    }

    pub fn wallets(&self) -> &[Wallet<S>] {
        &self.wallets
    }

    pub fn stats(&self) -> &SimulatorStats {
        &self.stats
    }

    /// Builds and submits the transaction of one round against the cached balances.
    ///
    /// Service rejections and non-JSON answers are reported in the outcome; any other
    /// failure ends the run.
    pub async fn run_round(&mut self) -> Result<RoundOutcome, SimulationError> {
        let views: Vec<WalletView<'_>> = self
            .wallets
            .iter()
            .map(|wallet| WalletView::new(wallet.address(), wallet.balance()))
            .collect();
        let plan = self
            .builder
            .plan_round(&views, &mut self.rng)
            .ok_or(SimulationError::PoolTooSmall(views.len()))?;
        drop(views);

        let outcome = match plan {
            RoundPlan::Standard(plan) => self.submit_standard(plan).await?,
            RoundPlan::Fusion(plan) => self.submit_fusion(plan).await?,
        };
        self.stats.record(&outcome);
        Ok(outcome)
    }

    async fn submit_standard(&self, plan: StandardPlan) -> Result<RoundOutcome, SimulationError> {
        let sender = &self.wallets[plan.sender];
        let required = plan.transaction.total_cost();
        let available = sender.balance().available;
        if required > available {
            let shortfall = Shortfall {
                wallet: plan.sender,
                required,
                available,
            };
            println!("{}", shortfall);
            tracing::info!(wallet = %sender.label(), required, available, "Skipping round");
            return Ok(RoundOutcome::Skipped(shortfall));
        }

        println!("\nSending transaction from {}...{}", sender.address(), plan.transaction);
        match sender.submit_standard(&plan.transaction).await {
            Ok(hash) => {
                println!("Transaction sent: {}", hash);
                Ok(RoundOutcome::Submitted {
                    kind: TransactionKind::Standard,
                    wallet: plan.sender,
                    hash,
                })
            }
            Err(error) => rejected(TransactionKind::Standard, plan.sender, error),
        }
    }

    async fn submit_fusion(&self, plan: FusionPlan) -> Result<RoundOutcome, SimulationError> {
        let wallet = &self.wallets[plan.wallet];
        println!("\nSending fusion transaction from {}...{}", wallet.address(), plan.transaction);
        match wallet.submit_fusion(&plan.transaction).await {
            Ok(hash) => {
                println!("Fusion Transaction sent: {}", hash);
                Ok(RoundOutcome::Submitted {
                    kind: TransactionKind::Fusion,
                    wallet: plan.wallet,
                    hash,
                })
            }
            Err(error) => rejected(TransactionKind::Fusion, plan.wallet, error),
        }
    }

    /// Refreshes every wallet in pool order and prints its new state.
    pub async fn refresh_and_report(&mut self) -> Result<(), SimulationError> {
        for wallet in self.wallets.iter_mut() {
            if let Err(source) = wallet.refresh_balance().await {
                return Err(SimulationError::Refresh {
                    wallet: wallet.label().to_string(),
                    source,
                });
            }
            println!("\n {}", wallet);
        }
        Ok(())
    }

    /// Runs rounds until `cancel` fires or a round fails, then prints and returns the statistics.
    pub async fn run_until_cancelled(
        mut self,
        cancel: &CancellationToken,
    ) -> Result<SimulatorStats, SimulationError> {
        tracing::info!(
            wallets = self.wallets.len(),
            interval = ?self.pacer.interval(),
            "Starting simulation"
        );
        self.pacer.start_at(Instant::now());
        while !cancel.is_cancelled() {
            let outcome = self.run_round().await?;
            tracing::debug!(round = self.stats.rounds(), ?outcome, "Round complete");
            if !self.pacer.wait(cancel).await {
                break;
            }
            self.refresh_and_report().await?;
        }
        tracing::info!(rounds = self.stats.rounds(), "Simulation cancelled");
        self.stats.print_final_stats();
        Ok(self.stats)
    }
}

/// Absorbs a refused or garbled submission into the round outcome; anything else is fatal.
fn rejected(
    kind: TransactionKind,
    wallet: usize,
    error: WalletError,
) -> Result<RoundOutcome, SimulationError> {
    if !error.is_submission_rejection() {
        return Err(SimulationError::Submission { source: error });
    }
    match kind {
        TransactionKind::Standard => println!("Error sending transaction: '{}'", error),
        TransactionKind::Fusion => println!("Error sending fusion transaction: '{}'", error),
    }
    tracing::warn!(%kind, wallet, error = %error, "Submission rejected");
    Ok(RoundOutcome::Rejected { kind, wallet, error })
}
