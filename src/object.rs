use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ContractRecord {
    pub name: String,
    pub address: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NetworkDeploymentSet {
    pub network: String,
    pub contracts: Vec<ContractRecord>,
}

// On-disk shape of the registry file
#[derive(Serialize, Deserialize, Default)]
pub(crate) struct DeploymentsFile {
    pub deployments: Vec<NetworkDeploymentSet>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FeeMode {
    Enabled,
    Disabled,
}

impl From<bool> for FeeMode {
    fn from(value: bool) -> Self {
        if value {
            FeeMode::Enabled
        } else {
            FeeMode::Disabled
        }
    }
}

/// EIP-1559 style fee bounds in wei, unset fields are estimated by the node at broadcast time
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct FeeConfiguration {
    pub max_fee_per_gas: Option<u128>,
    pub max_priority_fee_per_gas: Option<u128>,
    pub gas_limit: Option<u64>,
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct FeeHints {
    pub max_fee_per_gas: Option<u128>,
    pub max_priority_fee_per_gas: Option<u128>,
}

#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: String,
    // `None` creates a contract
    pub to: Option<String>,
    pub data: Vec<u8>,
    pub fees: FeeConfiguration,
}

impl TransactionRequest {
    pub fn new(from: &str, to: Option<&str>, data: Vec<u8>, fees: Option<FeeConfiguration>) -> Self {
        Self {
            from: from.to_string(),
            to: to.map(str::to_string),
            data,
            fees: fees.unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub transaction_hash: String,
    pub from: String,
    pub to: Option<String>,
    pub contract_address: Option<String>,
    pub status: bool,
    pub gas_used: u64,
    pub effective_gas_price: Option<u128>,
    pub block_number: u64,
}

/// A contract whose creation transaction has been mined successfully
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployedContract {
    pub address: String,
    pub tx_hash: String,
    pub gas_price: Option<u128>,
    pub deployer: String,
    pub chain_id: u64,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UrlKind {
    Address,
    Tx,
}
