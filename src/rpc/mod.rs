use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub mod client;
pub mod explorer_client;
pub mod messages;
pub mod wallet_client;

pub use client::JsonRpcClient;
pub use explorer_client::ExplorerClient;
pub use messages::{
    GetAddressesResult, GetBalanceResult, SendFusionTransactionParams, SendTransactionParams,
    SendTransactionResult, TransferOrder,
};
pub use wallet_client::RpcWalletClient;

#[cfg(test)]
mod tests;

#[derive(Debug, Error)]
pub enum RpcError {
    /// The service answered with an `error` envelope.
    #[error("{method} rejected by service: {message}")]
    Service {
        method: String,
        code: Option<i64>,
        message: String,
    },
    #[error("{method} transport failure: {source}")]
    Transport {
        method: String,
        #[source]
        source: reqwest::Error,
    },
    /// The response body is not JSON at all.
    #[error("{method} returned a malformed body: {message}")]
    MalformedBody { method: String, message: String },
    /// The body is JSON but the `result` is missing or has the wrong shape.
    #[error("{method} returned an undecodable response: {message}")]
    Decode { method: String, message: String },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl RpcError {
    /// Builds a `Service` error from the value found under the `error` key.
    pub fn service(method: &str, error: &Value) -> Self {
        let code = error.get("code").and_then(Value::as_i64);
        let message = match error.get("message").and_then(Value::as_str) {
            Some(message) => message.to_string(),
            None => match error {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            },
        };
        RpcError::Service {
            method: method.to_string(),
            code,
            message,
        }
    }

    pub fn decode(method: &str, message: impl Into<String>) -> Self {
        RpcError::Decode {
            method: method.to_string(),
            message: message.into(),
        }
    }

    pub fn malformed_body(method: &str, message: impl Into<String>) -> Self {
        RpcError::MalformedBody {
            method: method.to_string(),
            message: message.into(),
        }
    }

    /// Whether the service itself refused the call, as opposed to the call never completing.
    pub fn is_service_rejection(&self) -> bool {
        matches!(self, RpcError::Service { .. })
    }

    /// Whether a submission should be counted as refused and the run continue:
    /// an error envelope or a body that is not JSON.
    pub fn is_submission_rejection(&self) -> bool {
        matches!(self, RpcError::Service { .. } | RpcError::MalformedBody { .. })
    }
}

/// Methods consumed from a wallet payment service
#[async_trait]
pub trait WalletService: Send + Sync {
    /// Get the addresses held by the wallet container
    async fn get_addresses(&self) -> Result<GetAddressesResult, RpcError>;

    /// Get the available and locked balance
    async fn get_balance(&self) -> Result<GetBalanceResult, RpcError>;

    /// Clear the wallet cache and rescan the chain
    async fn reset(&self) -> Result<(), RpcError>;

    /// Send a standard transaction
    async fn send_transaction(
        &self,
        params: &SendTransactionParams,
    ) -> Result<SendTransactionResult, RpcError>;

    /// Send a fusion transaction
    async fn send_fusion_transaction(
        &self,
        params: &SendFusionTransactionParams,
    ) -> Result<SendTransactionResult, RpcError>;
}

/// Source of detailed block documents, queried by height
#[async_trait]
pub trait BlockExplorer: Send + Sync {
    async fn block_detailed(&self, height: u64) -> Result<Value, RpcError>;
}
