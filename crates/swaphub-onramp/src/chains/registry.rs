/*
[INPUT]:  Chain mapping rows
[OUTPUT]: O(1) lookups between wallet and aggregator chain ids
[POS]:    Chain layer - registry construction, validation and lookup
[UPDATE]: When adding lookup directions or validation rules
*/

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::types::ChainMapping;

/// Placeholder address used by the aggregator for native gas tokens
pub const NATIVE_TOKEN_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Whether `address` is the aggregator's native gas token placeholder
pub fn is_native_token(address: &str) -> bool {
    address.eq_ignore_ascii_case(NATIVE_TOKEN_ADDRESS)
}

const DEFAULT_CHAINS: &str = include_str!("default_chains.yaml");

/// Reasons a chain table is rejected at load time
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("failed to read chain table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse chain table: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("chain table is empty")]
    Empty,

    #[error("wallet chain id {0} is registered more than once")]
    DuplicateWalletId(u64),

    #[error("aggregator chain id {0} is registered more than once")]
    DuplicateAggregatorId(u64),

    #[error("chain {wallet_chain_id} has an empty {field}")]
    MissingField {
        wallet_chain_id: u64,
        field: &'static str,
    },

    #[error("chain {wallet_chain_id} has a malformed {field}: {value}")]
    InvalidUrl {
        wallet_chain_id: u64,
        field: &'static str,
        value: String,
    },
}

#[derive(Debug, Deserialize)]
struct ChainTable {
    chains: Vec<ChainMapping>,
}

/// Read-only bijection between the two chain id spaces.
///
/// Built once at startup; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ChainRegistry {
    chains: Vec<ChainMapping>,
    by_wallet: HashMap<u64, usize>,
    by_aggregator: HashMap<u64, usize>,
}

impl ChainRegistry {
    /// Registry from the table shipped with the crate
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_yaml_str(DEFAULT_CHAINS)
    }

    /// Registry from an operator-supplied YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_yaml_str(&content)?;
        info!(path = %path.display(), chains = registry.len(), "loaded chain table");
        Ok(registry)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, RegistryError> {
        let table: ChainTable = serde_yaml::from_str(content)?;
        Self::from_entries(table.chains)
    }

    /// Validate rows and build the lookup indexes
    pub fn from_entries(chains: Vec<ChainMapping>) -> Result<Self, RegistryError> {
        if chains.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut by_wallet = HashMap::with_capacity(chains.len());
        let mut by_aggregator = HashMap::with_capacity(chains.len());

        for (index, chain) in chains.iter().enumerate() {
            validate_entry(chain)?;

            if by_wallet.insert(chain.wallet_chain_id, index).is_some() {
                return Err(RegistryError::DuplicateWalletId(chain.wallet_chain_id));
            }
            if by_aggregator.insert(chain.aggregator_chain_id, index).is_some() {
                return Err(RegistryError::DuplicateAggregatorId(chain.aggregator_chain_id));
            }
        }

        Ok(Self {
            chains,
            by_wallet,
            by_aggregator,
        })
    }

    /// Aggregator id for a wallet-layer chain; `None` means unsupported.
    pub fn to_aggregator_id(&self, wallet_chain_id: u64) -> Option<u64> {
        self.by_wallet_id(wallet_chain_id)
            .map(|chain| chain.aggregator_chain_id)
    }

    /// Wallet-layer id for an aggregator chain; `None` means unsupported.
    pub fn to_wallet_id(&self, aggregator_chain_id: u64) -> Option<u64> {
        self.by_aggregator
            .get(&aggregator_chain_id)
            .map(|&index| self.chains[index].wallet_chain_id)
    }

    pub fn by_wallet_id(&self, wallet_chain_id: u64) -> Option<&ChainMapping> {
        self.by_wallet
            .get(&wallet_chain_id)
            .map(|&index| &self.chains[index])
    }

    /// All chains in table order
    pub fn supported(&self) -> &[ChainMapping] {
        &self.chains
    }

    /// Chains offered to users, in table order
    pub fn selectable(&self) -> impl Iterator<Item = &ChainMapping> {
        self.chains.iter().filter(|chain| chain.selectable)
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

fn validate_entry(chain: &ChainMapping) -> Result<(), RegistryError> {
    let id = chain.wallet_chain_id;

    if chain.name.trim().is_empty() {
        return Err(RegistryError::MissingField {
            wallet_chain_id: id,
            field: "name",
        });
    }
    if chain.native_currency_symbol.trim().is_empty() {
        return Err(RegistryError::MissingField {
            wallet_chain_id: id,
            field: "native_currency_symbol",
        });
    }

    for (field, value) in [("rpc_url", &chain.rpc_url), ("explorer_url", &chain.explorer_url)] {
        if let Some(value) = value {
            let well_formed = Url::parse(value)
                .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
                .unwrap_or(false);
            if !well_formed {
                return Err(RegistryError::InvalidUrl {
                    wallet_chain_id: id,
                    field,
                    value: value.clone(),
                });
            }
        }
    }

    Ok(())
}
