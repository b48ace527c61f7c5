use walletsim::rpc::{RpcError, RpcWalletClient};
use walletsim::{Wallet, WalletService};
use crate::config::Config;
use crate::simulation::SimulationError;

// ------------------------------------------------------------------------------------------------
// Wallet Pool Setup
// ------------------------------------------------------------------------------------------------

/// Creates one RPC client per configured wallet, in configuration order
pub fn connect_wallets(config: &Config) -> Result<Vec<RpcWalletClient>, RpcError> {
    config
        .wallets
        .iter()
        .map(|wallet| {
            RpcWalletClient::new(&wallet.endpoint(), &wallet.password, config.rpc_timeout())
        })
        .collect()
}

/// Initializes the wallet pool one wallet at a time, printing each wallet once ready.
///
/// `services` must be in configuration order; wallets are labelled `host:port`.
pub async fn initialize_wallets<S: WalletService>(
    config: &Config,
    services: Vec<S>,
) -> Result<Vec<Wallet<S>>, SimulationError> {
    if services.len() < 2 {
        return Err(SimulationError::PoolTooSmall(services.len()));
    }

    let mut wallets = Vec::with_capacity(services.len());
    for (wallet_config, service) in config.wallets.iter().zip(services) {
        let label = wallet_config.endpoint().to_string();
        tracing::info!(wallet = %label, reset = config.reset_on_start, "Initializing wallet");
        let wallet = Wallet::initialize(service, label.clone(), config.reset_on_start)
            .await
            .map_err(|source| SimulationError::Initialization { wallet: label, source })?;
        println!("{}", wallet);
        wallets.push(wallet);
    }
    Ok(wallets)
}
