//! Application configuration read from the environment (and `.env`, if present).
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `SUPPLYGUARD_NETWORKS` | path to a network table | the built-in table |
//! | `SUPPLYGUARD_CONTRACT_ADDRESS` | deployed contract address | [`SUPPLY_GUARD_ADDRESS`] |
//! | `SUPPLYGUARD_CONTRACT_ABI` | path to the contract artifact JSON | none |
//! | `SUPPLYGUARD_VIEWER_ADDRESS` | account whose user record the form loads | none |

use crate::contract::{ContractError, ContractFactory, ContractInterface, SUPPLY_GUARD_ADDRESS};
use crate::model::{Address, AddressError};
use crate::network::{NetworkError, NetworkTable};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const NETWORKS_VAR: &str = "SUPPLYGUARD_NETWORKS";
pub const CONTRACT_ADDRESS_VAR: &str = "SUPPLYGUARD_CONTRACT_ADDRESS";
pub const CONTRACT_ABI_VAR: &str = "SUPPLYGUARD_CONTRACT_ABI";
pub const VIEWER_ADDRESS_VAR: &str = "SUPPLYGUARD_VIEWER_ADDRESS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("Invalid {var}: {source}")]
    InvalidAddress {
        var: &'static str,
        #[source]
        source: AddressError,
    },

    #[error("Failed to load contract interface: {0}")]
    Contract(#[from] ContractError),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub networks: NetworkTable,
    pub contract_address: Address,
    pub contract_abi: Option<PathBuf>,
    pub viewer: Option<Address>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let networks = match lookup(NETWORKS_VAR) {
            Some(path) => NetworkTable::load(Path::new(&path))?,
            None => NetworkTable::builtin()?,
        };
        let contract_address = parse_address(
            CONTRACT_ADDRESS_VAR,
            lookup(CONTRACT_ADDRESS_VAR).as_deref().unwrap_or(SUPPLY_GUARD_ADDRESS),
        )?;
        let viewer = lookup(VIEWER_ADDRESS_VAR)
            .map(|value| parse_address(VIEWER_ADDRESS_VAR, &value))
            .transpose()?;
        let contract_abi = lookup(CONTRACT_ABI_VAR).map(PathBuf::from);

        info!(
            default_network = %networks.default_network,
            contract = %contract_address,
            "Configuration loaded"
        );
        debug!(?contract_abi, ?viewer, "Optional settings");

        Ok(Self {
            networks,
            contract_address,
            contract_abi,
            viewer,
        })
    }

    /// Contract factory for the configured address, if an artifact path is set.
    pub fn contract_factory(&self) -> Result<Option<ContractFactory>, ConfigError> {
        let Some(path) = &self.contract_abi else {
            return Ok(None);
        };
        let interface = ContractInterface::load(path)?;
        Ok(Some(ContractFactory::new(self.contract_address, interface)))
    }
}

fn parse_address(var: &'static str, value: &str) -> Result<Address, ConfigError> {
    value
        .parse()
        .map_err(|source| ConfigError::InvalidAddress { var, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.contract_address, SUPPLY_GUARD_ADDRESS.parse::<Address>().unwrap());
        assert_eq!(config.networks.default_network, "sepolia");
        assert!(config.viewer.is_none());
        assert!(config.contract_factory().unwrap().is_none());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (CONTRACT_ADDRESS_VAR, "0x00000000000000000000000000000000000000aa"),
            (VIEWER_ADDRESS_VAR, "0x00000000000000000000000000000000000000bb"),
        ]))
        .unwrap();

        assert_eq!(config.contract_address.as_bytes()[19], 0xaa);
        assert_eq!(config.viewer.map(|v| v.as_bytes()[19]), Some(0xbb));
    }

    #[test]
    fn test_bad_viewer_address_names_the_variable() {
        let err = AppConfig::from_lookup(lookup(&[(VIEWER_ADDRESS_VAR, "bob")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidAddress { var: VIEWER_ADDRESS_VAR, .. }
        ));
    }

    #[test]
    fn test_missing_network_file() {
        let err = AppConfig::from_lookup(lookup(&[(NETWORKS_VAR, "/nonexistent/networks.toml")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Network(NetworkError::Io { .. })));
    }
}
