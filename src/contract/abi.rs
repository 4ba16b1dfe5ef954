//! Contract imports: ABI plus deployed address per chain tag.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use alloy::json_abi::{Event, Function, JsonAbi};
use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blockchain::ChainTag;

/// Errors reading a contract import file.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid contract import: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A named ABI entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AbiEntry {
    Function(Function),
    Event(Event),
}

impl AbiEntry {
    pub fn name(&self) -> &str {
        match self {
            AbiEntry::Function(f) => &f.name,
            AbiEntry::Event(e) => &e.name,
        }
    }

    pub fn signature(&self) -> String {
        match self {
            AbiEntry::Function(f) => f.signature(),
            AbiEntry::Event(e) => e.signature(),
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            AbiEntry::Function(f) => Some(f),
            AbiEntry::Event(_) => None,
        }
    }

    pub fn as_event(&self) -> Option<&Event> {
        match self {
            AbiEntry::Event(e) => Some(e),
            AbiEntry::Function(_) => None,
        }
    }
}

/// ABI and deployment addresses of one contract.
///
/// ```json
/// { "abi": [ ... ], "address": { "0x27": "0x0000000000000000000000000000456e65726779" } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractImport {
    pub abi: JsonAbi,
    #[serde(default)]
    pub address: HashMap<ChainTag, Address>,
}

impl ContractImport {
    pub fn new(abi: JsonAbi) -> Self {
        Self {
            abi,
            address: HashMap::new(),
        }
    }

    /// Register the deployed address for a chain tag.
    pub fn with_address(mut self, chain_tag: ChainTag, address: Address) -> Self {
        self.address.insert(chain_tag, address);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ImportError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Deployed address on `chain_tag`, if known.
    pub fn address_for(&self, chain_tag: ChainTag) -> Option<Address> {
        self.address.get(&chain_tag).copied()
    }

    /// First function named `name`.
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.abi.function(name).and_then(|overloads| overloads.first())
    }

    /// First event named `name`.
    pub fn event(&self, name: &str) -> Option<&Event> {
        self.abi.event(name).and_then(|overloads| overloads.first())
    }

    /// Lookup by name across functions, then events.
    pub fn entry(&self, name: &str) -> Option<AbiEntry> {
        self.function(name)
            .cloned()
            .map(AbiEntry::Function)
            .or_else(|| self.event(name).cloned().map(AbiEntry::Event))
    }

    /// Every function and event, functions first.
    pub fn entries(&self) -> Vec<AbiEntry> {
        self.abi
            .functions()
            .cloned()
            .map(AbiEntry::Function)
            .chain(self.abi.events().cloned().map(AbiEntry::Event))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENERGY_IMPORT: &str = r#"{
        "abi": [
            {
                "type": "function",
                "name": "balanceOf",
                "inputs": [{ "name": "_owner", "type": "address", "internalType": "address" }],
                "outputs": [{ "name": "balance", "type": "uint256", "internalType": "uint256" }],
                "stateMutability": "view"
            },
            {
                "type": "event",
                "name": "Transfer",
                "inputs": [
                    { "name": "_from", "type": "address", "indexed": true, "internalType": "address" },
                    { "name": "_to", "type": "address", "indexed": true, "internalType": "address" },
                    { "name": "_value", "type": "uint256", "indexed": false, "internalType": "uint256" }
                ],
                "anonymous": false
            }
        ],
        "address": { "0x27": "0x0000000000000000000000000000456e65726779" }
    }"#;

    #[test]
    fn test_lookup_by_name() {
        let import = ContractImport::from_json(ENERGY_IMPORT).unwrap();

        let entry = import.entry("balanceOf").unwrap();
        assert_eq!(entry.name(), "balanceOf");
        assert_eq!(entry.signature(), "balanceOf(address)");
        assert!(entry.as_function().is_some());

        let entry = import.entry("Transfer").unwrap();
        assert_eq!(entry.signature(), "Transfer(address,address,uint256)");
        assert!(entry.as_event().is_some());

        assert!(import.entry("approve").is_none());
        assert!(import.function("Transfer").is_none());
        assert!(import.event("balanceOf").is_none());
    }

    #[test]
    fn test_address_by_chain_tag() {
        let import = ContractImport::from_json(ENERGY_IMPORT).unwrap();
        let expected: Address = "0x0000000000000000000000000000456e65726779".parse().unwrap();
        assert_eq!(import.address_for(ChainTag::TESTNET), Some(expected));
        assert_eq!(import.address_for(ChainTag::MAINNET), None);
    }

    #[test]
    fn test_entries_lists_functions_first() {
        let import = ContractImport::from_json(ENERGY_IMPORT).unwrap();
        let names: Vec<_> = import.entries().iter().map(|e| e.name().to_string()).collect();
        assert_eq!(names, vec!["balanceOf", "Transfer"]);
    }

    #[test]
    fn test_builder_registers_address() {
        let abi = ContractImport::from_json(ENERGY_IMPORT).unwrap().abi;
        let import = ContractImport::new(abi).with_address(ChainTag::MAINNET, Address::ZERO);
        assert_eq!(import.address_for(ChainTag::MAINNET), Some(Address::ZERO));
        assert!(import.function("balanceOf").is_some());
    }

    #[test]
    fn test_invalid_import() {
        let err = ContractImport::from_json(r#"{ "address": {} }"#).unwrap_err();
        assert!(err.to_string().starts_with("Invalid contract import"));
    }
}
