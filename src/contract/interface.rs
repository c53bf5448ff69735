//! Contract interface descriptions.
//!
//! An interface is read from a compiled contract artifact: a JSON object with a
//! `contractName` and an `abi` array. Only function entries are kept; events,
//! errors and constructors are not callable through a handle.

use super::ContractError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// How a function interacts with contract state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    Nonpayable,
    Payable,
}

impl StateMutability {
    pub fn is_read_only(self) -> bool {
        matches!(self, StateMutability::Pure | StateMutability::View)
    }
}

/// A named, typed parameter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Param {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One callable function of the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiFunction {
    pub name: String,
    pub inputs: Vec<Param>,
    pub outputs: Vec<Param>,
    pub state_mutability: StateMutability,
}

impl AbiFunction {
    /// Canonical signature, e.g. `addProduct(string,uint256)`.
    pub fn signature(&self) -> String {
        let kinds: Vec<&str> = self.inputs.iter().map(|p| p.kind.as_str()).collect();
        format!("{}({})", self.name, kinds.join(","))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AbiEntry {
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<Param>,
    #[serde(default)]
    outputs: Vec<Param>,
    state_mutability: Option<StateMutability>,
    #[serde(default)]
    constant: bool,
    #[serde(default)]
    payable: bool,
}

fn function_kind() -> String {
    "function".to_string()
}

impl AbiEntry {
    // Old compilers omit `stateMutability` and use `constant`/`payable` instead.
    fn mutability(&self) -> StateMutability {
        match self.state_mutability {
            Some(m) => m,
            None if self.constant => StateMutability::View,
            None if self.payable => StateMutability::Payable,
            None => StateMutability::Nonpayable,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Artifact {
    contract_name: String,
    abi: Vec<AbiEntry>,
}

/// The callable surface of one deployed contract.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractInterface {
    name: String,
    functions: BTreeMap<String, Vec<AbiFunction>>,
}

impl ContractInterface {
    /// Parses a compiled artifact (`{"contractName": ..., "abi": [...]}`).
    pub fn from_artifact_json(json: &str) -> Result<Self, ContractError> {
        let artifact: Artifact =
            serde_json::from_str(json).map_err(|e| ContractError::InvalidInterface(e.to_string()))?;
        if artifact.contract_name.is_empty() {
            return Err(ContractError::InvalidInterface("contractName is empty".to_string()));
        }

        let mut functions: BTreeMap<String, Vec<AbiFunction>> = BTreeMap::new();
        for entry in artifact.abi {
            if entry.kind != "function" {
                continue;
            }
            if entry.name.is_empty() {
                return Err(ContractError::InvalidInterface(
                    "function entry without a name".to_string(),
                ));
            }
            let state_mutability = entry.mutability();
            functions.entry(entry.name.clone()).or_default().push(AbiFunction {
                name: entry.name,
                inputs: entry.inputs,
                outputs: entry.outputs,
                state_mutability,
            });
        }

        Ok(Self {
            name: artifact.contract_name,
            functions,
        })
    }

    /// Reads an artifact file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContractError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ContractError::InvalidInterface(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_artifact_json(&json)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All overloads named `name`.
    pub fn overloads(&self, name: &str) -> &[AbiFunction] {
        self.functions.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Picks the function to call with `arity` arguments.
    ///
    /// `function` is either a bare name or a full signature such as
    /// `transfer(address,uint256)`. A bare name must match exactly one
    /// overload of that arity; otherwise the signature is needed.
    pub fn resolve(&self, function: &str, arity: usize) -> Result<&AbiFunction, ContractError> {
        let requested: String = function.chars().filter(|c| !c.is_whitespace()).collect();
        let name = requested.split('(').next().unwrap_or_default();
        let overloads = self.overloads(name);
        let unknown = || ContractError::UnknownFunction {
            contract: self.name.clone(),
            function: function.to_string(),
        };

        if requested.contains('(') {
            let abi = overloads
                .iter()
                .find(|f| f.signature() == requested)
                .ok_or_else(unknown)?;
            return check_arity(abi, arity);
        }

        let mut candidates = overloads.iter().filter(|f| f.inputs.len() == arity);
        match (candidates.next(), candidates.next()) {
            (Some(abi), None) => Ok(abi),
            (Some(_), Some(_)) => Err(ContractError::AmbiguousFunction {
                function: name.to_string(),
                candidates: overloads
                    .iter()
                    .filter(|f| f.inputs.len() == arity)
                    .map(AbiFunction::signature)
                    .collect(),
            }),
            (None, _) => match overloads.first() {
                None => Err(unknown()),
                Some(abi) => check_arity(abi, arity),
            },
        }
    }

    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }
}

fn check_arity(abi: &AbiFunction, given: usize) -> Result<&AbiFunction, ContractError> {
    if abi.inputs.len() == given {
        Ok(abi)
    } else {
        Err(ContractError::ArgumentCount {
            function: abi.name.clone(),
            expected: abi.inputs.len(),
            given,
        })
    }
}
