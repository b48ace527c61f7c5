pub mod types;
pub mod rpc;
pub mod wallet;
pub mod explorer;
pub mod utils;

#[cfg(any(test, feature = "test"))]
pub mod testing;

pub use rpc::{BlockExplorer, RpcError, WalletService};
pub use wallet::{Wallet, WalletError};
