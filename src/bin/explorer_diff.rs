use std::env;
use anyhow::Context;
use tokio_util::sync::CancellationToken;
use walletsim::explorer::{DivergenceWatcher, ExplorerDiffConfig, WatchOutcome};
use walletsim::rpc::ExplorerClient;
use walletsim::utils::logging;

const DEFAULT_CONFIG_PATH: &str = "explorer_diff.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let config_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = ExplorerDiffConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path))?;

    let left = ExplorerClient::new(&config.left, config.rpc_timeout())
        .context("creating client for the left explorer")?;
    let right = ExplorerClient::new(&config.right, config.rpc_timeout())
        .context("creating client for the right explorer")?;
    let mut watcher =
        DivergenceWatcher::new(left, right, config.start_height, config.poll_interval());
    if let Some(end_height) = config.end_height {
        watcher = watcher.with_end_height(end_height);
    }

    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_on_signal.cancel();
        }
    });

    println!(
        "Comparing explorer {} against {} from height {}",
        config.left, config.right, config.start_height
    );
    let outcome = watcher
        .run(&cancel)
        .await
        .context("querying explorer services")?;

    match outcome {
        WatchOutcome::Diverged(divergence) => {
            println!("Divergence at height {}:", divergence.height);
            for difference in &divergence.differences {
                println!("\t{}", difference);
            }
        }
        WatchOutcome::Exhausted { last_height } => {
            println!("No divergence up to height {}", last_height);
        }
        WatchOutcome::Cancelled { next_height } => {
            println!("Stopped before height {}", next_height);
        }
    }
    Ok(())
}
