use std::time::Duration;
use async_trait::async_trait;
use crate::types::Endpoint;
use super::messages::{
    EmptyParams, GetAddressesResult, GetBalanceResult, SendFusionTransactionParams,
    SendTransactionParams, SendTransactionResult, METHOD_GET_ADDRESSES, METHOD_GET_BALANCE,
    METHOD_RESET, METHOD_SEND_FUSION_TRANSACTION, METHOD_SEND_TRANSACTION,
};
use super::{JsonRpcClient, RpcError, WalletService};

/// Path of the wallet service JSON-RPC endpoint
pub const WALLET_RPC_PATH: &str = "/json_rpc";

/// [`WalletService`] backed by a payment service reachable over HTTP
#[derive(Debug, Clone)]
pub struct RpcWalletClient {
    rpc: JsonRpcClient,
}

impl RpcWalletClient {
    pub fn new(endpoint: &Endpoint, password: &str, timeout: Duration) -> Result<Self, RpcError> {
        let rpc = JsonRpcClient::new(
            endpoint.url(WALLET_RPC_PATH),
            Some(password.to_string()),
            timeout,
        )?;
        Ok(Self { rpc })
    }
}

#[async_trait]
impl WalletService for RpcWalletClient {
    async fn get_addresses(&self) -> Result<GetAddressesResult, RpcError> {
        self.rpc.call(METHOD_GET_ADDRESSES, &EmptyParams::default()).await
    }

    async fn get_balance(&self) -> Result<GetBalanceResult, RpcError> {
        self.rpc.call(METHOD_GET_BALANCE, &EmptyParams::default()).await
    }

    async fn reset(&self) -> Result<(), RpcError> {
        // The reset payload carries nothing of interest
        self.rpc.call_raw(METHOD_RESET, &EmptyParams::default()).await?;
        Ok(())
    }

    async fn send_transaction(
        &self,
        params: &SendTransactionParams,
    ) -> Result<SendTransactionResult, RpcError> {
        self.rpc.call(METHOD_SEND_TRANSACTION, params).await
    }

    async fn send_fusion_transaction(
        &self,
        params: &SendFusionTransactionParams,
    ) -> Result<SendTransactionResult, RpcError> {
        self.rpc.call(METHOD_SEND_FUSION_TRANSACTION, params).await
    }
}
