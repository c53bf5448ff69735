//! # Network table
//!
//! Which chains the contract can be reached on, read from a TOML table shaped
//! like this:
//!
//! ```toml
//! default_network = "sepolia"
//! solidity = "0.8.24"
//!
//! [networks.hardhat]
//! chain_id = 4202
//!
//! [networks.sepolia]
//! url = "https://rpc.sepolia-api.lisk.com"
//! accounts = ["secrete.txt"]
//! gas_price = 1000000000
//! ```
//!
//! The table shipped with the crate is embedded and available through
//! [`NetworkTable::builtin`]. Key files listed under `accounts` are only read
//! when [`Network::credentials`] is called.

pub mod credential;

pub use credential::*;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument};

/// The in-process development network. It is the only one that needs no URL.
pub const LOCAL_NETWORK: &str = "hardhat";

const BUILTIN_TABLE: &str = include_str!("../../networks.toml");

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse network table: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Default network '{0}' is not defined")]
    MissingDefault(String),

    #[error("Network '{0}' has no RPC URL")]
    MissingUrl(String),

    #[error("Network '{network}' has an invalid RPC URL: {url}")]
    InvalidUrl { network: String, url: String },

    #[error("Invalid key in {path}: {reason}")]
    Credential { path: PathBuf, reason: String },
}

/// Settings for one named network.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    pub url: Option<String>,
    pub chain_id: Option<u64>,
    #[serde(default)]
    pub accounts: Vec<CredentialPath>,
    /// Fixed gas limit per transaction.
    pub gas: Option<u64>,
    /// Gas price in wei.
    pub gas_price: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkTable {
    pub default_network: String,
    pub solidity: String,
    #[serde(default)]
    pub allow_unlimited_contract_size: bool,
    #[serde(default)]
    pub throw_on_transaction_failures: bool,
    #[serde(default)]
    pub throw_on_call_failures: bool,
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkConfig>,
    /// Directory relative key paths resolve against.
    #[serde(skip)]
    base_dir: PathBuf,
}

/// A named entry of a [`NetworkTable`].
#[derive(Debug, Clone, Copy)]
pub struct Network<'a> {
    pub name: &'a str,
    pub config: &'a NetworkConfig,
    base_dir: &'a Path,
}

impl Network<'_> {
    pub fn is_local(&self) -> bool {
        self.name == LOCAL_NETWORK
    }

    /// Reads every key file listed for this network.
    #[instrument(skip(self), fields(network = self.name))]
    pub fn credentials(&self) -> Result<Vec<SigningKey>, NetworkError> {
        self.config
            .accounts
            .iter()
            .map(|path| path.load(self.base_dir))
            .collect()
    }
}

impl NetworkTable {
    /// Parses and validates a table. Relative key paths resolve against the
    /// working directory.
    pub fn from_toml_str(contents: &str) -> Result<Self, NetworkError> {
        let table: NetworkTable = toml::from_str(contents)?;
        table.validate()?;
        Ok(table)
    }

    /// Reads a table from disk. Relative key paths resolve against the file's
    /// directory.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, NetworkError> {
        let contents = std::fs::read_to_string(path).map_err(|source| NetworkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut table = Self::from_toml_str(&contents)?;
        table.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        debug!(networks = table.networks.len(), "Network table loaded");
        Ok(table)
    }

    /// The table shipped with the crate.
    pub fn builtin() -> Result<Self, NetworkError> {
        Self::from_toml_str(BUILTIN_TABLE)
    }

    /// Checks that the default network exists and every remote network has an
    /// `http(s)` URL.
    pub fn validate(&self) -> Result<(), NetworkError> {
        if !self.networks.contains_key(&self.default_network) {
            return Err(NetworkError::MissingDefault(self.default_network.clone()));
        }
        for (name, config) in &self.networks {
            match &config.url {
                Some(url) if !(url.starts_with("https://") || url.starts_with("http://")) => {
                    return Err(NetworkError::InvalidUrl {
                        network: name.clone(),
                        url: url.clone(),
                    });
                }
                None if name != LOCAL_NETWORK => {
                    return Err(NetworkError::MissingUrl(name.clone()));
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Network<'_>, NetworkError> {
        self.networks
            .get_key_value(name)
            .map(|(name, config)| self.entry(name, config))
            .ok_or_else(|| NetworkError::UnknownNetwork(name.to_string()))
    }

    pub fn default_entry(&self) -> Result<Network<'_>, NetworkError> {
        self.get(&self.default_network)
            .map_err(|_| NetworkError::MissingDefault(self.default_network.clone()))
    }

    /// First network (by name) configured with `chain_id`.
    pub fn by_chain_id(&self, chain_id: u64) -> Option<Network<'_>> {
        self.networks
            .iter()
            .find(|(_, config)| config.chain_id == Some(chain_id))
            .map(|(name, config)| self.entry(name, config))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }

    fn entry<'a>(&'a self, name: &'a str, config: &'a NetworkConfig) -> Network<'a> {
        Network {
            name,
            config,
            base_dir: &self.base_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_valid() {
        let table = NetworkTable::builtin().unwrap();

        assert_eq!(table.default_network, "sepolia");
        assert_eq!(table.solidity, "0.8.24");
        assert!(table.allow_unlimited_contract_size);
        assert!(table.throw_on_call_failures);

        let sepolia = table.default_entry().unwrap();
        assert_eq!(sepolia.config.url.as_deref(), Some("https://rpc.sepolia-api.lisk.com"));
        assert_eq!(sepolia.config.gas_price, Some(1_000_000_000));
        assert_eq!(sepolia.config.accounts, vec![CredentialPath::new("secrete.txt")]);

        let local = table.by_chain_id(4202).unwrap();
        assert_eq!(local.name, LOCAL_NETWORK);
        assert!(local.is_local());
        assert!(local.credentials().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_network_lookup() {
        let table = NetworkTable::builtin().unwrap();
        assert!(matches!(table.get("ropsten"), Err(NetworkError::UnknownNetwork(n)) if n == "ropsten"));
        assert!(table.by_chain_id(1).is_none());
        assert!(table.names().any(|n| n == "BitTorrent"));
    }

    #[test]
    fn test_default_network_must_exist() {
        let result = NetworkTable::from_toml_str(
            r#"
            default_network = "mainnet"
            solidity = "0.8.24"

            [networks.hardhat]
            chain_id = 31337
            "#,
        );
        assert!(matches!(result, Err(NetworkError::MissingDefault(n)) if n == "mainnet"));
    }

    #[test]
    fn test_remote_networks_need_http_url() {
        let missing = NetworkTable::from_toml_str(
            r#"
            default_network = "hardhat"
            solidity = "0.8.24"

            [networks.hardhat]

            [networks.remote]
            chain_id = 5
            "#,
        );
        assert!(matches!(missing, Err(NetworkError::MissingUrl(n)) if n == "remote"));

        let invalid = NetworkTable::from_toml_str(
            r#"
            default_network = "remote"
            solidity = "0.8.24"

            [networks.remote]
            url = "ws://localhost:8546"
            "#,
        );
        assert!(matches!(invalid, Err(NetworkError::InvalidUrl { .. })));
    }

    #[test]
    fn test_unknown_keys_are_parse_errors() {
        let result = NetworkTable::from_toml_str(
            r#"
            default_network = "hardhat"
            solidity = "0.8.24"

            [networks.hardhat]
            chainId = 4202
            "#,
        );
        assert!(matches!(result, Err(NetworkError::Parse(_))));
    }

    #[test]
    fn test_loaded_table_resolves_keys_next_to_it() {
        let dir = std::env::temp_dir().join(format!("supply-guard-net-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("networks.toml"),
            r#"
            default_network = "devnet"
            solidity = "0.8.24"

            [networks.devnet]
            url = "http://127.0.0.1:8545"
            chain_id = 1337
            accounts = ["deployer.key"]
            gas = 2100000
            "#,
        )
        .unwrap();
        std::fs::write(
            dir.join("deployer.key"),
            "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
        )
        .unwrap();

        let table = NetworkTable::load(&dir.join("networks.toml")).unwrap();
        let devnet = table.get("devnet").unwrap();
        assert_eq!(devnet.config.gas, Some(2_100_000));
        assert_eq!(devnet.credentials().unwrap().len(), 1);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
