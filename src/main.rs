use clap::Parser;
use counter_console::{
    init_logging, Cli, ConsoleConfig, ConsoleSession, DeploymentRegistry, DialoguerPrompt,
    HdWallets, Network, RpcClient, RPC,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_logging(cli.debug);

    let network = Network::by_name(&cli.network)?;
    let rpc_url = cli.rpc_url.unwrap_or_else(|| network.resolve_rpc_url());
    let wallets = cli
        .mnemonic
        .as_deref()
        .map(|phrase| HdWallets::from_mnemonic(phrase, cli.wallets))
        .transpose()?;
    if wallets.is_none() {
        warn!("no MNEMONIC set, transactions are signed by the node");
    }
    let rpc = RpcClient::connect(&rpc_url, wallets.as_ref())?;
    let chain_id = rpc.chain_id().await?;
    if chain_id != network.chain_id {
        warn!(expected = network.chain_id, chain_id, "node chain id differs from the selected network");
    }
    info!(%network, rpc = %rpc.url(), "console started");

    let registry = DeploymentRegistry::load(&cli.deployments);
    let config = ConsoleConfig {
        network: network.name.to_string(),
        fee_mode: cli.gas_mode.into(),
        artifact_path: cli.artifact,
    };
    ConsoleSession::new(rpc, DialoguerPrompt::default(), registry, config)
        .run()
        .await
}
