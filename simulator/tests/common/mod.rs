use simulator::{initialize_wallets, Config};
use walletsim::testing::MockWalletService;
use walletsim::types::Balance;
use walletsim::Wallet;

const ADDRESSES: [&str; 4] = ["A", "B", "C", "D"];

/// Config with exact fee (1) and amount (100), a 1ms round interval and a fixed seed.
/// `extra` holds additional top-level keys.
pub fn test_config(wallets: usize, fusion_probability: u32, extra: &str) -> Config {
    let mut toml = format!(
        r#"
        {extra}
        MinimumFee = 1
        MaximumFee = 1
        MinimumAmount = 100
        MaximumAmount = 100
        MinAnonymity = 0
        MaxAnonymity = 2
        MinFusionThreshold = 1000
        MaxFusionThreshold = 5000
        FusionPropability = {fusion_probability}
        TransactionsPerMinute = 60000
        ResetOnStart = false
        Seed = 7
        "#
    );
    for index in 0..wallets {
        toml.push_str(&format!(
            "\n[[Wallets]]\nHost = \"127.0.0.1\"\nPort = {}\nPassword = \"secret\"\n",
            8070 + index
        ));
    }
    Config::from_toml_str(&toml).expect("Failed to build test config")
}

/// One mock per balance, addressed "A", "B", ... in pool order
pub fn mocks(available: &[u64]) -> Vec<MockWalletService> {
    available
        .iter()
        .zip(ADDRESSES)
        .map(|(&available, address)| MockWalletService::new(address, Balance::new(available, 0)))
        .collect()
}

/// Initializes a wallet pool over clones of `mocks`, so the test keeps handles on them
pub async fn pool(config: &Config, mocks: &[MockWalletService]) -> Vec<Wallet<MockWalletService>> {
    initialize_wallets(config, mocks.to_vec())
        .await
        .expect("Failed to initialize wallet pool")
}
