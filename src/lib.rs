mod command;
mod error;
mod fee;
mod handle;
mod logging;
mod network;
mod object;
mod prompt;
mod registry;
mod rpc;
mod session;
#[cfg(any(test, feature = "simulation"))]
pub mod simulation;
mod waiter;
mod wallet;

pub use command::Cli;
pub use error::ConsoleError;
pub use fee::{format_gwei, parse_gwei, FeeEstimator};
pub use handle::{deploy_contract, deploy_counter, track, DeployState};
pub use logging::init_logging;
pub use network::{explorer_url, network_name, Network, NETWORKS};
pub use object::{
    ContractRecord, DeployedContract, FeeConfiguration, FeeHints, FeeMode, NetworkDeploymentSet,
    Receipt, TransactionRequest, UrlKind,
};
pub use prompt::{ask_for, ask_for_address, ask_for_number, DialoguerPrompt, Prompt};
pub use registry::DeploymentRegistry;
pub use rpc::{send_and_wait, PendingTransaction, RpcClient, RPC};
pub use session::{ConsoleConfig, ConsoleSession, Usage};
pub use waiter::{await_expected_failure, await_success, failure_reason};
pub use wallet::{HdWallets, DEFAULT_DERIVATION_PATH, DEFAULT_WALLET_COUNT};

