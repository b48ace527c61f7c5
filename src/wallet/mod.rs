use std::fmt;
use thiserror::Error;
use crate::rpc::{
    RpcError, SendFusionTransactionParams, SendTransactionParams, WalletService,
};
use crate::types::{Balance, FusionTransaction, StandardTransaction};


#[derive(Debug, Error)]
pub enum WalletError {
    #[error("wallet {wallet}: {source}")]
    Rpc {
        wallet: String,
        #[source]
        source: RpcError,
    },
    #[error("wallet {wallet} reported no addresses")]
    NoAddress { wallet: String },
}

impl WalletError {
    fn rpc(wallet: &str, source: RpcError) -> Self {
        WalletError::Rpc {
            wallet: wallet.to_string(),
            source,
        }
    }

    /// Whether the wallet service refused the call, which is recoverable for submissions.
    pub fn is_service_rejection(&self) -> bool {
        matches!(self, WalletError::Rpc { source, .. } if source.is_service_rejection())
    }

    /// Whether a failed submission is absorbed by the caller rather than ending the run.
    pub fn is_submission_rejection(&self) -> bool {
        matches!(self, WalletError::Rpc { source, .. } if source.is_submission_rejection())
    }
}

/// Local view of one wallet: its service, its address and the last balance it reported.
///
/// The address is fetched once by [`Wallet::initialize`] and never changes afterwards.
/// The balance only changes through [`Wallet::refresh_balance`].
pub struct Wallet<S> {
    service: S,
    label: String,
    address: String,
    balance: Balance,
}

impl<S: WalletService> Wallet<S> {
    /// Fetches the first address, optionally resets the wallet, then loads its balance.
    pub async fn initialize(
        service: S,
        label: impl Into<String>,
        reset: bool,
    ) -> Result<Self, WalletError> {
        let label = label.into();
        let addresses = service
            .get_addresses()
            .await
            .map_err(|e| WalletError::rpc(&label, e))?;
        let address = addresses
            .addresses
            .into_iter()
            .next()
            .ok_or_else(|| WalletError::NoAddress {
                wallet: label.clone(),
            })?;

        if reset {
            tracing::info!(wallet = %label, "Resetting wallet");
            service.reset().await.map_err(|e| WalletError::rpc(&label, e))?;
        }

        let mut wallet = Self {
            service,
            label,
            address,
            balance: Balance::default(),
        };
        wallet.refresh_balance().await?;
        tracing::info!(wallet = %wallet.label, address = %wallet.address, "Wallet initialized");
        Ok(wallet)
    }

    /// Replaces the cached balance with the one the service reports now.
    pub async fn refresh_balance(&mut self) -> Result<Balance, WalletError> {
        let result = self
            .service
            .get_balance()
            .await
            .map_err(|e| WalletError::rpc(&self.label, e))?;
        self.balance = Balance::from(result);
        Ok(self.balance)
    }

    /// Sends a standard transaction and returns its hash.
    pub async fn submit_standard(&self, tx: &StandardTransaction) -> Result<String, WalletError> {
        let params = SendTransactionParams::from(tx);
        let result = self
            .service
            .send_transaction(&params)
            .await
            .map_err(|e| WalletError::rpc(&self.label, e))?;
        tracing::debug!(
            wallet = %self.label,
            hash = %result.transaction_hash,
            "Transaction accepted"
        );
        Ok(result.transaction_hash)
    }

    /// Sends a fusion transaction and returns its hash.
    pub async fn submit_fusion(&self, tx: &FusionTransaction) -> Result<String, WalletError> {
        let params = SendFusionTransactionParams::from(tx);
        let result = self
            .service
            .send_fusion_transaction(&params)
            .await
            .map_err(|e| WalletError::rpc(&self.label, e))?;
        tracing::debug!(
            wallet = %self.label,
            hash = %result.transaction_hash,
            "Fusion transaction accepted"
        );
        Ok(result.transaction_hash)
    }
}

impl<S> Wallet<S> {
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Name used in logs and errors, usually `host:port`
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Last balance reported by the service
    pub fn balance(&self) -> Balance {
        self.balance
    }
}

impl<S> fmt::Display for Wallet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\tBalance\t{}", self.address, self.balance)
    }
}
