use alloy_primitives::{Address, ChainId, TxHash};
use alloy_rpc_types::TransactionRequest;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An account the page's wallet has granted access to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub address: Address,
    pub chain_id: ChainId,
}

impl Connection {
    pub fn new(address: Address, chain_id: ChainId) -> Self {
        Self { address, chain_id }
    }
}

/// Posted by the page after probing `window.ethereum`.
///
/// `has_provider` is false when no wallet is injected at all; `error` carries
/// the wallet's message when access was requested but not granted (the user
/// dismissed the prompt, usually).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConnectionReport {
    pub has_provider: bool,
    pub connection: Option<Connection>,
    pub error: Option<String>,
}

/// A transaction queued for the browser wallet to sign and send.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BridgeTransaction {
    /// Unique id for tracking in the page.
    pub id: Uuid,
    /// Standard alloy transaction request.
    #[serde(flatten)]
    pub request: TransactionRequest,
}

/// The page's answer to a queued transaction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub id: Uuid,
    pub hash: Option<TxHash>,
    pub error: Option<String>,
}

/// A `wallet_switchEthereumChain` prompt queued for the wallet.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ChainSwitchRequest {
    pub id: Uuid,
    pub chain_id: ChainId,
}

/// The page's answer to a queued chain switch.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainSwitchResponse {
    pub id: Uuid,
    pub error: Option<String>,
}

/// Ok/error envelope for bridge API responses.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum ApiResponse<T> {
    Ok(T),
    Error { message: String },
}

impl<T> ApiResponse<T> {
    pub fn ok(value: T) -> Self {
        Self::Ok(value)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { message: message.into() }
    }
}
