//! HTTP client for the office bridge.

use crate::config::ConnectionConfig;
use crate::error::RemoteError;
use crate::remote::RemoteResult;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::trace;

/// Target name of the bridge's root service manager.
pub const SERVICE_MANAGER: &str = "ServiceManager";

#[derive(Serialize)]
struct CallRequest<'a> {
    target: &'a str,
    method: &'a str,
    args: &'a [Value],
}

#[derive(Deserialize)]
struct CallResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<RemoteException>,
}

#[derive(Deserialize)]
struct RemoteException {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    message: String,
}

fn map_http_error(error: reqwest::Error) -> RemoteError {
    if let Some(status) = error.status() {
        RemoteError::Transport(format!("Bridge returned status {}: {}", status, error))
    } else if error.is_timeout() {
        RemoteError::Transport(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        RemoteError::Transport(format!("Connection error: {}", error))
    } else {
        RemoteError::Transport(format!("HTTP error: {}", error))
    }
}

/// Map a remote exception onto the errors callers branch on. The first argument of the
/// failed call names the missing element or index.
fn map_exception(exception: RemoteException, args: &[Value]) -> RemoteError {
    let first_arg = args.first();
    if exception.kind.ends_with("NoSuchElementException") {
        let name = first_arg
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(exception.message);
        return RemoteError::NoSuchElement(name);
    }
    if exception.kind.ends_with("IndexOutOfBoundsException") {
        if let Some(index) = first_arg.and_then(Value::as_u64) {
            return RemoteError::IndexOutOfBounds(index as usize);
        }
    }
    RemoteError::Exception {
        kind: exception.kind,
        message: exception.message,
    }
}

/// Blocking client: each call is one HTTP round trip driven to completion on a private
/// single-threaded runtime.
pub struct BridgeClient {
    client: Client,
    runtime: Runtime,
    endpoint: String,
}

impl BridgeClient {
    pub fn new(config: &ConnectionConfig) -> RemoteResult<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .no_proxy()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Transport(format!("Failed to create HTTP client: {}", e)))?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| RemoteError::Transport(format!("Failed to create runtime: {}", e)))?;

        Ok(Self {
            client,
            runtime,
            endpoint: config.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Call `method` on the remote object `target`.
    pub fn call(&self, target: &str, method: &str, args: &[Value]) -> RemoteResult<Value> {
        trace!(target_object = target, method, "Bridge call");
        let request = CallRequest {
            target,
            method,
            args,
        };
        let response: CallResponse = self.runtime.block_on(async {
            let response = self
                .client
                .post(&self.endpoint)
                .json(&request)
                .send()
                .await
                .map_err(map_http_error)?
                .error_for_status()
                .map_err(map_http_error)?;
            response
                .json::<CallResponse>()
                .await
                .map_err(|e| RemoteError::Protocol(format!("Failed to parse response: {}", e)))
        })?;

        match response.error {
            Some(exception) => Err(map_exception(exception, args)),
            None => Ok(response.result),
        }
    }
}
