use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::{
    error::ConsoleError,
    network::network_name,
    object::{ContractRecord, DeploymentsFile, NetworkDeploymentSet},
};

const JSON_INDENT: &[u8] = b"    ";

/// Deployed contract addresses partitioned by network, networks kept in ascending name order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeploymentRegistry {
    path: PathBuf,
    deployments: Vec<NetworkDeploymentSet>,
}

impl DeploymentRegistry {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            deployments: Vec::new(),
        }
    }

    /// Loads the registry file, falling back to an empty registry if it is missing or unreadable
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let mut registry = Self::new(path);
        let file = match fs::read(&registry.path) {
            Ok(content) => serde_json::from_slice::<DeploymentsFile>(&content),
            Err(error) => {
                debug!(path = %registry.path.display(), %error, "no deployments file, starting empty");
                return registry;
            }
        };
        match file {
            Ok(file) => {
                registry.deployments = file.deployments;
                if !registry.is_sorted() {
                    warn!(path = %registry.path.display(), "deployments file out of order, sorting by network");
                    registry.deployments.sort_by(|a, b| a.network.cmp(&b.network));
                }
                info!(
                    path = %registry.path.display(),
                    networks = registry.deployments.len(),
                    "loaded deployments"
                );
            }
            Err(error) => {
                warn!(path = %registry.path.display(), %error, "unparseable deployments file, starting empty");
            }
        }
        registry
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn deployments(&self) -> &[NetworkDeploymentSet] {
        &self.deployments
    }

    pub fn networks(&self) -> Vec<&str> {
        self.deployments.iter().map(|d| d.network.as_str()).collect()
    }

    pub fn find_address(&self, network: &str, contract_name: &str) -> Option<&str> {
        self.deployments
            .iter()
            .find(|d| d.network == network)?
            .contracts
            .iter()
            .find(|c| c.name == contract_name)
            .map(|c| c.address.as_str())
    }

    pub fn upsert(&mut self, network: &str, contract_name: &str, address: &str) {
        if let Some(set) = self.deployments.iter_mut().find(|d| d.network == network) {
            match set.contracts.iter_mut().find(|c| c.name == contract_name) {
                Some(record) => record.address = address.to_string(),
                None => set.contracts.push(ContractRecord {
                    name: contract_name.to_string(),
                    address: address.to_string(),
                }),
            }
            return;
        }
        let index = self.insertion_index(network);
        self.deployments.insert(
            index,
            NetworkDeploymentSet {
                network: network.to_string(),
                contracts: vec![ContractRecord {
                    name: contract_name.to_string(),
                    address: address.to_string(),
                }],
            },
        );
    }

    /// Upsert keyed by chain id, the registry is untouched when the chain has no configured name
    pub fn upsert_for_chain(
        &mut self,
        chain_id: u64,
        contract_name: &str,
        address: &str,
    ) -> Result<&'static str, ConsoleError> {
        let network = network_name(chain_id).ok_or(ConsoleError::UnsupportedNetwork(chain_id))?;
        self.upsert(network, contract_name, address);
        Ok(network)
    }

    // Binary search for the slot of a network that is not in the registry yet
    fn insertion_index(&self, network: &str) -> usize {
        let sets = &self.deployments;
        let mut start = 0;
        let mut end = sets.len();
        while start < end {
            let mid = start + (end - start) / 2;
            if sets[mid].network.as_str() < network {
                if mid + 1 >= end || sets[mid + 1].network.as_str() > network {
                    return mid + 1;
                }
                start = mid + 1;
            } else {
                if mid == 0 {
                    return 0;
                }
                end = mid;
            }
        }
        start
    }

    fn is_sorted(&self) -> bool {
        self.deployments
            .windows(2)
            .all(|pair| pair[0].network <= pair[1].network)
    }

    /// Rewrites the whole registry file, pretty printed
    ///
    /// The content is staged in a temporary file next to the registry and renamed over it,
    /// so the file on disk is always either the previous or the new registry.
    pub fn persist(&self) -> eyre::Result<()> {
        let parent = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };
        let file = DeploymentsFile {
            deployments: self.deployments.clone(),
        };
        let mut staged = NamedTempFile::new_in(parent)?;
        let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut staged, formatter);
        file.serialize(&mut serializer)?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path)?;
        info!(path = %self.path.display(), networks = self.deployments.len(), "persisted deployments");
        Ok(())
    }
}
