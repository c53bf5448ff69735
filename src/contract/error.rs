//! Error types for contract bindings.

use crate::model::AddressError;
use thiserror::Error;

/// Failures reported by a [`WalletProvider`](super::WalletProvider).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WalletError {
    #[error("User rejected the request")]
    Rejected,

    #[error("Wallet is not connected")]
    Disconnected,

    #[error("Wallet RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
}

/// Errors raised by contract interface loading and handle calls.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ContractError {
    #[error("Invalid contract interface: {0}")]
    InvalidInterface(String),

    #[error("Invalid contract address: {0}")]
    InvalidAddress(#[from] AddressError),

    #[error("Contract {contract} has no function {function}")]
    UnknownFunction { contract: String, function: String },

    #[error("{function} is overloaded; call one of {candidates:?} by signature")]
    AmbiguousFunction {
        function: String,
        candidates: Vec<String>,
    },

    #[error("{function} expects {expected} arguments, got {given}")]
    ArgumentCount {
        function: String,
        expected: usize,
        given: usize,
    },

    #[error("{0} changes contract state; send it with write()")]
    NotReadOnly(String),

    #[error("{0} is read-only; call it with read()")]
    ReadOnly(String),

    #[error(transparent)]
    Wallet(#[from] WalletError),
}
