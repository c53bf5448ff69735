use super::WalletError;
use crate::model::Address;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::fmt::{self, Display};

/// A contract call as handed to the wallet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    /// Account that signs (or, for reads, is reported as the caller).
    pub from: Address,
    /// Contract address.
    pub to: Address,
    /// Canonical function signature, e.g. `stock(string,uint256)`.
    pub function: String,
    pub args: Vec<Value>,
}

/// Hash of a submitted transaction, as reported by the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TxHash(pub String);

impl Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The signing capability of a connected wallet.
///
/// Callers acquire a provider once (for example from a browser bridge) and pass
/// it to [`ContractFactory::bind`](super::ContractFactory::bind); nothing in this
/// crate looks one up on its own.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// The account the user has selected, if any.
    fn selected_account(&self) -> Option<Address>;

    /// Chain the wallet is currently connected to.
    async fn chain_id(&self) -> Result<u64, WalletError>;

    /// Executes a read-only call and returns its decoded result.
    async fn call(&self, request: CallRequest) -> Result<Value, WalletError>;

    /// Signs and submits a state-changing call.
    async fn send_transaction(&self, request: CallRequest) -> Result<TxHash, WalletError>;
}
