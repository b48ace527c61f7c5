use std::time::Duration;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use super::messages::RequestEnvelope;
use super::RpcError;

/// JSON-RPC protocol version sent in every envelope
pub const JSONRPC_VERSION: &str = "2.0";
/// Request id sent in every envelope; responses are not matched against it
pub const REQUEST_ID: &str = "test";

/// Async JSON-RPC 2.0 client bound to a single URL.
///
/// Every call is a single POST; there is no retry. A response carrying an
/// `error` key fails with [`RpcError::Service`] regardless of the HTTP status.
/// A body that is not JSON fails with [`RpcError::MalformedBody`], one that is JSON
/// but lacks the expected `result` with [`RpcError::Decode`].
#[derive(Debug, Clone)]
pub struct JsonRpcClient {
    http: reqwest::Client,
    url: String,
    password: Option<String>,
}

impl JsonRpcClient {
    pub fn new(
        url: impl Into<String>,
        password: Option<String>,
        timeout: Duration,
    ) -> Result<Self, RpcError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RpcError::Client)?;
        Ok(Self {
            http,
            url: url.into(),
            password,
        })
    }

    /// Sends `method` and returns the raw `result` member, if the response has one.
    pub async fn call_raw<P>(&self, method: &str, params: &P) -> Result<Option<Value>, RpcError>
    where
        P: Serialize + ?Sized,
    {
        let request = RequestEnvelope {
            jsonrpc: JSONRPC_VERSION,
            method,
            id: REQUEST_ID,
            params,
            password: self.password.as_deref(),
        };
        tracing::debug!(url = %self.url, method, "Sending JSON-RPC request");

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|source| RpcError::Transport {
                method: method.to_string(),
                source,
            })?;

        let body = response.bytes().await.map_err(|source| RpcError::Transport {
            method: method.to_string(),
            source,
        })?;
        let payload: Value = serde_json::from_slice(&body)
            .map_err(|e| RpcError::malformed_body(method, e.to_string()))?;
        let mut payload: Map<String, Value> = match payload {
            Value::Object(payload) => payload,
            other => {
                return Err(RpcError::decode(
                    method,
                    format!("expected a JSON-RPC object, got {}", other),
                ))
            }
        };

        if let Some(error) = payload.get("error") {
            return Err(RpcError::service(method, error));
        }
        Ok(payload.remove("result"))
    }

    /// Sends `method` and decodes the `result` member into `R`.
    pub async fn call<P, R>(&self, method: &str, params: &P) -> Result<R, RpcError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let result = self
            .call_raw(method, params)
            .await?
            .ok_or_else(|| RpcError::decode(method, "response missing result field"))?;
        serde_json::from_value(result).map_err(|e| RpcError::decode(method, e.to_string()))
    }
}
