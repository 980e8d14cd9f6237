use std::path::PathBuf;

use clap::Parser;

use crate::wallet::DEFAULT_WALLET_COUNT;

#[derive(Parser)]
#[command(version, about = "Deploy the Counter contract and call it interactively", long_about = None)]
pub struct Cli {
    /// The network to use, one of `mainnet`, `goerli`, `optimism`, `bsc`, `polygon-mainnet`,
    /// `arbitrum`, `arbitrum-goerli`, `avalanche`, `polygon-mumbai`, `hardhat`
    #[arg(short, long, env = "NETWORK", default_value_t = String::from("hardhat"))]
    pub network: String,

    /// Overrides the RPC endpoint of the network
    #[arg(long, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// BIP-39 phrase the signing wallets are derived from, without it the node's unlocked
    /// accounts sign
    #[arg(long, env = "MNEMONIC", hide_env_values = true)]
    pub mnemonic: Option<String>,

    /// How many wallets to derive from the mnemonic
    #[arg(long, env = "WALLET_COUNT", default_value_t = DEFAULT_WALLET_COUNT)]
    pub wallets: u32,

    /// Ask for maxFeePerGas, maxPriorityFeePerGas and gasLimit before any transaction
    #[arg(long, env = "GAS_MODE", default_value_t = false)]
    pub gas_mode: bool,

    /// The registry of deployed contract addresses
    #[arg(long, env = "DEPLOYMENTS_FILE", default_value = "deployments.json")]
    pub deployments: PathBuf,

    /// Hardhat artifact of the Counter contract
    #[arg(
        long,
        env = "COUNTER_ARTIFACT",
        default_value = "artifacts/contracts/Counter.sol/Counter.json"
    )]
    pub artifact: PathBuf,

    /// Enable debug logging
    #[arg(long, env = "CONSOLE_DEBUG", default_value_t = false)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["counter-console"]).unwrap();
        assert_eq!(cli.network, "hardhat");
        assert_eq!(cli.rpc_url, None);
        assert_eq!(cli.wallets, DEFAULT_WALLET_COUNT);
        assert!(!cli.gas_mode);
        assert_eq!(cli.deployments, PathBuf::from("deployments.json"));
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "counter-console",
            "--network",
            "goerli",
            "--gas-mode",
            "--rpc-url",
            "http://localhost:8545",
            "--mnemonic",
            "test test test test test test test test test test test junk",
            "--wallets",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.network, "goerli");
        assert!(cli.gas_mode);
        assert_eq!(cli.rpc_url.as_deref(), Some("http://localhost:8545"));
        assert!(cli.mnemonic.unwrap().ends_with("junk"));
        assert_eq!(cli.wallets, 3);
    }
}
