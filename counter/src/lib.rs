use std::{fs, path::Path};

use alloy_primitives::{Bytes, U256};
use alloy_sol_types::{sol, SolConstructor};

mod operation;
pub use operation::*;

pub const COUNTER_NAME: &str = "Counter";
pub const INIT_COUNT: u128 = 0;

sol! {
    /// ABI of the Counter contract driven by the console
    contract Counter {
        constructor(uint256 initCount);

        function incrementCount() external;
        function decrementCount() external;
        function setCount(uint256 count) external;
        function getCount() external view returns (uint256);
    }
}

// Hardhat artifact layout, only the fields needed to deploy are kept
#[derive(serde::Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    pub bytecode: Bytes,
}

impl ContractArtifact {
    pub fn load<P: AsRef<Path>>(path: P) -> eyre::Result<Self> {
        let path = path.as_ref();
        let content = fs::read(path).map_err(|e| eyre::eyre!("{e}:{}", path.to_string_lossy()))?;
        let artifact: ContractArtifact = serde_json::from_slice(&content)?;
        if artifact.bytecode.is_empty() {
            return Err(eyre::eyre!("artifact {} has no bytecode", artifact.contract_name));
        }
        Ok(artifact)
    }

    /// Creation code followed by the ABI encoded `initCount` constructor argument
    pub fn deploy_data(&self, init_count: u128) -> Vec<u8> {
        let constructor = Counter::constructorCall {
            initCount: U256::from(init_count),
        };
        [self.bytecode.as_ref(), constructor.abi_encode().as_slice()].concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deploy_data_appends_constructor_argument() {
        let artifact = ContractArtifact {
            contract_name: COUNTER_NAME.to_string(),
            bytecode: Bytes::from_static(&[0x60, 0x80]),
        };
        let data = artifact.deploy_data(7);
        assert_eq!(data.len(), 2 + 32);
        assert_eq!(&data[..2], &[0x60, 0x80]);
        assert_eq!(data[33], 7);
    }

    #[test]
    fn test_artifact_bytecode_is_hex_decoded() {
        let dir = std::env::temp_dir().join(format!("counter-artifact-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("Counter.json");

        fs::write(&path, r#"{"contractName":"Counter","abi":[],"bytecode":"0x6080"}"#).unwrap();
        let artifact = ContractArtifact::load(&path).unwrap();
        assert_eq!(artifact.bytecode.as_ref(), &[0x60, 0x80]);

        fs::write(&path, r#"{"contractName":"Counter","bytecode":"0x"}"#).unwrap();
        assert!(ContractArtifact::load(&path).is_err());
        assert!(ContractArtifact::load(dir.join("missing.json")).is_err());
        fs::remove_dir_all(&dir).unwrap();
    }
}
