use super::{AbiFunction, CallRequest, ContractError, ContractInterface, TxHash, WalletProvider};
use crate::model::Address;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

/// A read/write capability for one deployed contract, signing as one account.
///
/// Calls are checked against the interface before the wallet sees them: the
/// function must exist with the given number of arguments, `read` only accepts
/// `view`/`pure` functions and `write` only accepts state-changing ones.
pub struct ContractHandle {
    address: Address,
    interface: Arc<ContractInterface>,
    wallet: Arc<dyn WalletProvider>,
    account: Address,
}

impl ContractHandle {
    pub(super) fn new(
        address: Address,
        interface: Arc<ContractInterface>,
        wallet: Arc<dyn WalletProvider>,
        account: Address,
    ) -> Self {
        Self {
            address,
            interface,
            wallet,
            account,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// The account calls are signed with.
    pub fn account(&self) -> Address {
        self.account
    }

    pub fn interface(&self) -> &ContractInterface {
        &self.interface
    }

    /// Network the wallet is connected to right now.
    pub async fn chain_id(&self) -> Result<u64, ContractError> {
        Ok(self.wallet.chain_id().await?)
    }

    /// Calls a `view` or `pure` function.
    #[instrument(skip(self, args), fields(contract = %self.address, arity = args.len()))]
    pub async fn read(&self, function: &str, args: Vec<Value>) -> Result<Value, ContractError> {
        let abi = self.interface.resolve(function, args.len())?;
        if !abi.state_mutability.is_read_only() {
            return Err(ContractError::NotReadOnly(abi.signature()));
        }
        let request = self.request(abi, args);
        debug!(function = %request.function, "Calling contract");
        Ok(self.wallet.call(request).await?)
    }

    /// Sends a transaction to a state-changing function.
    #[instrument(skip(self, args), fields(contract = %self.address, arity = args.len()))]
    pub async fn write(&self, function: &str, args: Vec<Value>) -> Result<TxHash, ContractError> {
        let abi = self.interface.resolve(function, args.len())?;
        if abi.state_mutability.is_read_only() {
            return Err(ContractError::ReadOnly(abi.signature()));
        }
        let request = self.request(abi, args);
        debug!(function = %request.function, "Sending transaction");
        let hash = self.wallet.send_transaction(request).await?;
        debug!(%hash, "Transaction submitted");
        Ok(hash)
    }

    fn request(&self, abi: &AbiFunction, args: Vec<Value>) -> CallRequest {
        CallRequest {
            from: self.account,
            to: self.address,
            function: abi.signature(),
            args,
        }
    }
}

impl fmt::Debug for ContractHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractHandle")
            .field("contract", &self.interface.name())
            .field("address", &self.address)
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}
