pub mod account_selector;
pub mod config;
pub mod network;
pub mod pacing;
pub mod simulation;
pub mod stats;
pub mod tx_builder;

pub use account_selector::{AccountSelector, WalletView};
pub use config::{Config, ConfigError};
pub use network::{connect_wallets, initialize_wallets};
pub use pacing::Pacer;
pub use simulation::{RoundOutcome, Shortfall, Simulation, SimulationError};
pub use stats::SimulatorStats;
pub use tx_builder::{RoundPlan, TransactionBounds, TransactionBuilder};
