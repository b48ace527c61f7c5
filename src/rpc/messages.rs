//! Typed request and result payloads for every JSON-RPC method the harness uses.

use serde::{Deserialize, Serialize};
use crate::types::{Balance, FusionTransaction, StandardTransaction};

pub const METHOD_GET_ADDRESSES: &str = "getAddresses";
pub const METHOD_GET_BALANCE: &str = "getBalance";
pub const METHOD_RESET: &str = "reset";
pub const METHOD_SEND_TRANSACTION: &str = "sendTransaction";
pub const METHOD_SEND_FUSION_TRANSACTION: &str = "sendFusionTransaction";
pub const METHOD_BLOCK_DETAILED: &str = "explorer.block.detailed";

/// Outgoing JSON-RPC 2.0 envelope
#[derive(Debug, Serialize)]
pub struct RequestEnvelope<'a, P: Serialize + ?Sized> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub id: &'a str,
    pub params: &'a P,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
}

/// Parameters of methods that take none; serializes as `{}`
#[derive(Debug, Default, Serialize)]
pub struct EmptyParams {}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GetAddressesResult {
    pub addresses: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct GetBalanceResult {
    pub available_balance: u64,
    pub locked_amount: u64,
}

impl From<GetBalanceResult> for Balance {
    fn from(result: GetBalanceResult) -> Self {
        Balance::new(result.available_balance, result.locked_amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOrder {
    pub address: String,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendTransactionParams {
    pub transfers: Vec<TransferOrder>,
    pub anonymity: u16,
    pub fee: u64,
    pub unlock_time: u64,
}

impl From<&StandardTransaction> for SendTransactionParams {
    fn from(tx: &StandardTransaction) -> Self {
        Self {
            transfers: tx
                .transfers
                .iter()
                .map(|transfer| TransferOrder {
                    address: transfer.address.clone(),
                    amount: transfer.amount,
                })
                .collect(),
            anonymity: tx.anonymity,
            fee: tx.fee,
            unlock_time: tx.unlock_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendFusionTransactionParams {
    pub threshold: u64,
    pub anonymity: u16,
}

impl From<&FusionTransaction> for SendFusionTransactionParams {
    fn from(tx: &FusionTransaction) -> Self {
        Self {
            threshold: tx.threshold,
            anonymity: tx.anonymity,
        }
    }
}

/// Result of both `sendTransaction` and `sendFusionTransaction`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendTransactionResult {
    pub transaction_hash: String,
}

/// Parameters of `explorer.block.detailed`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockQuery {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub value: u64,
}

impl BlockQuery {
    pub fn height(height: u64) -> Self {
        Self { kind: "height", value: height }
    }
}
