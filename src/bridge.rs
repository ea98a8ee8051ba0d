//! Office Bridge
//!
//! Session to a running office instance through its JSON bridge endpoint. Each remote
//! method call is a blocking `POST` of `{"target", "method", "args"}` answered by either
//! `{"result"}` or `{"error": {"type", "message"}}`; objects travel as
//! `{"$object": <id>}` references.

mod client;
mod objects;

pub use client::{BridgeClient, SERVICE_MANAGER};
pub use objects::BridgeSession;

use crate::config::ConnectionConfig;
use crate::error::ExchangeError;
use tracing::info;

impl BridgeSession {
    /// Build a session for the bridge at `config.host:config.port`.
    pub fn connect(config: &ConnectionConfig) -> Result<Self, ExchangeError> {
        let client = BridgeClient::new(config)?;
        info!(endpoint = client.endpoint(), "Connecting to office bridge");
        Ok(Self::new(client))
    }
}
