use std::time::Duration;
use async_trait::async_trait;
use serde_json::Value;
use crate::types::Endpoint;
use super::messages::{BlockQuery, METHOD_BLOCK_DETAILED};
use super::{BlockExplorer, JsonRpcClient, RpcError};

/// Path of the explorer JSON-RPC endpoint
pub const EXPLORER_RPC_PATH: &str = "/rpc";

/// [`BlockExplorer`] backed by a node's explorer RPC service
#[derive(Debug, Clone)]
pub struct ExplorerClient {
    rpc: JsonRpcClient,
}

impl ExplorerClient {
    pub fn new(endpoint: &Endpoint, timeout: Duration) -> Result<Self, RpcError> {
        let rpc = JsonRpcClient::new(endpoint.url(EXPLORER_RPC_PATH), None, timeout)?;
        Ok(Self { rpc })
    }
}

#[async_trait]
impl BlockExplorer for ExplorerClient {
    async fn block_detailed(&self, height: u64) -> Result<Value, RpcError> {
        self.rpc
            .call(METHOD_BLOCK_DETAILED, &BlockQuery::height(height))
            .await
    }
}
