//! # Contract bindings
//!
//! [`ContractFactory`] turns a wallet capability into a [`ContractHandle`] for the
//! one deployed contract the application talks to. The contract's own rules live
//! on chain; a handle only checks calls against the interface description and
//! forwards them to the wallet.
//!
//! A missing wallet is an ordinary state, not an error: [`ContractFactory::bind`]
//! returns `None` and the caller decides what to show.

pub mod error;
pub mod handle;
pub mod interface;
pub mod wallet;

pub use error::*;
pub use handle::ContractHandle;
pub use interface::*;
pub use wallet::*;

use crate::model::Address;
use std::sync::Arc;
use tracing::{debug, info};

/// Address of the deployed SupplyGuard contract.
pub const SUPPLY_GUARD_ADDRESS: &str = "0x0C4361c038696dB4e2A28367689e60eE6F8F94FB";

/// Builds handles for one contract address and interface.
///
/// Every call to [`bind`](Self::bind) creates a fresh handle; nothing is cached.
#[derive(Debug, Clone)]
pub struct ContractFactory {
    address: Address,
    interface: Arc<ContractInterface>,
}

impl ContractFactory {
    pub fn new(address: Address, interface: ContractInterface) -> Self {
        Self {
            address,
            interface: Arc::new(interface),
        }
    }

    /// Factory for the deployed SupplyGuard contract.
    pub fn supply_guard(interface: ContractInterface) -> Result<Self, ContractError> {
        Ok(Self::new(SUPPLY_GUARD_ADDRESS.parse()?, interface))
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Binds the contract to the wallet's selected account.
    ///
    /// Returns `None` when there is no wallet or it has no selected account.
    pub fn bind(&self, wallet: Option<Arc<dyn WalletProvider>>) -> Option<ContractHandle> {
        let Some(wallet) = wallet else {
            info!(contract = %self.address, "No wallet connected");
            return None;
        };
        let Some(account) = wallet.selected_account() else {
            info!(contract = %self.address, "Wallet has no selected account");
            return None;
        };
        debug!(contract = %self.address, %account, "Contract bound");
        Some(ContractHandle::new(
            self.address,
            self.interface.clone(),
            wallet,
            account,
        ))
    }
}
