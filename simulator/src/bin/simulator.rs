use std::env;
use anyhow::Context;
use chrono::Local;
use tokio_util::sync::CancellationToken;
use walletsim::utils::logging;
use simulator::{connect_wallets, initialize_wallets, Config, Simulation};

const DEFAULT_CONFIG_PATH: &str = "simulation.toml";

// ------------------------------------------------------------------------------------------------
// Main
// ------------------------------------------------------------------------------------------------

/// Loads the configuration, initializes the wallet pool and runs until Ctrl-C
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let config_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&config_path)
        .with_context(|| format!("loading {}", config_path))?;
    log_configuration(&config);

    let services = connect_wallets(&config).context("creating wallet clients")?;
    let wallets = initialize_wallets(&config, services)
        .await
        .context("initializing wallets")?;
    let simulation = Simulation::new(&config, wallets)?;

    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_on_signal.cancel();
        }
    });

    println!("Simulation started at {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    simulation
        .run_until_cancelled(&cancel)
        .await
        .context("running simulation")?;
    Ok(())
}

fn log_configuration(config: &Config) {
    let start_time = Local::now();
    tracing::info!("=== Simulation Configuration ===");
    tracing::info!("Start Time: {}", start_time.format("%Y-%m-%d %H:%M:%S"));
    tracing::info!("Wallets: {}", config.wallets.len());
    tracing::info!("Fee: {:?}", config.fee_range());
    tracing::info!("Amount: {:?}", config.amount_range());
    tracing::info!("Anonymity: {:?}", config.anonymity_range());
    tracing::info!("Fusion Threshold: {:?}", config.fusion_threshold_range());
    tracing::info!("Fusion Probability: {}%", config.fusion_probability);
    tracing::info!("Transactions Per Minute: {}", config.transactions_per_minute);
    tracing::info!("Selection Policy: {:?}", config.selection_policy);
    tracing::info!("Pacing: {:?}", config.pacing);
    tracing::info!("Reset On Start: {}", config.reset_on_start);
    tracing::info!("=============================");
}
