//! In-memory wallet service used by the test suites of this workspace.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use async_trait::async_trait;
use crate::rpc::messages::{
    METHOD_GET_ADDRESSES, METHOD_GET_BALANCE, METHOD_RESET, METHOD_SEND_FUSION_TRANSACTION,
    METHOD_SEND_TRANSACTION,
};
use crate::rpc::{
    GetAddressesResult, GetBalanceResult, RpcError, SendFusionTransactionParams,
    SendTransactionParams, SendTransactionResult, WalletService,
};
use crate::types::Balance;

/// A call received by [`MockWalletService`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    GetAddresses,
    GetBalance,
    Reset,
    SendTransaction(SendTransactionParams),
    SendFusionTransaction(SendFusionTransactionParams),
}

/// How a scripted method fails
#[derive(Debug, Clone)]
pub enum MockFailure {
    /// The service answers with an error envelope
    Rejected(String),
    /// The service answers with a body that is not JSON
    MalformedBody(String),
    /// The service answers with JSON whose `result` cannot be decoded
    Undecodable(String),
}

#[derive(Debug, Default)]
struct MockState {
    addresses: Vec<String>,
    balance: Balance,
    calls: Vec<RecordedCall>,
    failures: HashMap<&'static str, MockFailure>,
    sent: u64,
}

/// Wallet service whose answers are scripted by the test.
///
/// Clones share state, so a test can keep a handle after moving the service into a wallet.
#[derive(Debug, Clone, Default)]
pub struct MockWalletService {
    state: Arc<Mutex<MockState>>,
}

impl MockWalletService {
    pub fn new(address: &str, balance: Balance) -> Self {
        Self::with_addresses(vec![address.to_string()], balance)
    }

    pub fn with_addresses(addresses: Vec<String>, balance: Balance) -> Self {
        let service = Self::default();
        {
            let mut state = service.state();
            state.addresses = addresses;
            state.balance = balance;
        }
        service
    }

    pub fn set_balance(&self, balance: Balance) {
        self.state().balance = balance;
    }

    /// Makes every later call to `method` fail.
    pub fn fail(&self, method: &'static str, failure: MockFailure) {
        self.state().failures.insert(method, failure);
    }

    pub fn clear_failures(&self) {
        self.state().failures.clear();
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state().calls.clone()
    }

    pub fn count_calls(&self, expected: fn(&RecordedCall) -> bool) -> usize {
        self.state().calls.iter().filter(|call| expected(call)).count()
    }

    pub fn sent_transactions(&self) -> Vec<SendTransactionParams> {
        self.state()
            .calls
            .iter()
            .filter_map(|call| match call {
                RecordedCall::SendTransaction(params) => Some(params.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn sent_fusion_transactions(&self) -> Vec<SendFusionTransactionParams> {
        self.state()
            .calls
            .iter()
            .filter_map(|call| match call {
                RecordedCall::SendFusionTransaction(params) => Some(params.clone()),
                _ => None,
            })
            .collect()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, method: &'static str, call: RecordedCall) -> Result<(), RpcError> {
        let mut state = self.state();
        state.calls.push(call);
        match state.failures.get(method) {
            Some(MockFailure::Rejected(message)) => Err(RpcError::Service {
                method: method.to_string(),
                code: Some(-32000),
                message: message.clone(),
            }),
            Some(MockFailure::MalformedBody(message)) => {
                Err(RpcError::malformed_body(method, message.clone()))
            }
            Some(MockFailure::Undecodable(message)) => {
                Err(RpcError::decode(method, message.clone()))
            }
            None => Ok(()),
        }
    }

    fn next_hash(&self) -> String {
        let mut state = self.state();
        state.sent += 1;
        format!("{:064x}", state.sent)
    }
}

#[async_trait]
impl WalletService for MockWalletService {
    async fn get_addresses(&self) -> Result<GetAddressesResult, RpcError> {
        self.record(METHOD_GET_ADDRESSES, RecordedCall::GetAddresses)?;
        Ok(GetAddressesResult {
            addresses: self.state().addresses.clone(),
        })
    }

    async fn get_balance(&self) -> Result<GetBalanceResult, RpcError> {
        self.record(METHOD_GET_BALANCE, RecordedCall::GetBalance)?;
        let balance = self.state().balance;
        Ok(GetBalanceResult {
            available_balance: balance.available,
            locked_amount: balance.locked,
        })
    }

    async fn reset(&self) -> Result<(), RpcError> {
        self.record(METHOD_RESET, RecordedCall::Reset)
    }

    async fn send_transaction(
        &self,
        params: &SendTransactionParams,
    ) -> Result<SendTransactionResult, RpcError> {
        self.record(METHOD_SEND_TRANSACTION, RecordedCall::SendTransaction(params.clone()))?;
        Ok(SendTransactionResult {
            transaction_hash: self.next_hash(),
        })
    }

    async fn send_fusion_transaction(
        &self,
        params: &SendFusionTransactionParams,
    ) -> Result<SendTransactionResult, RpcError> {
        self.record(
            METHOD_SEND_FUSION_TRANSACTION,
            RecordedCall::SendFusionTransaction(params.clone()),
        )?;
        Ok(SendTransactionResult {
            transaction_hash: self.next_hash(),
        })
    }
}
