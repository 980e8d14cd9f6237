use std::future::Future;

use counter::{ContractArtifact, INIT_COUNT};
use tracing::{info, warn};

use crate::{
    error::ConsoleError,
    network::explorer_url,
    object::{DeployedContract, FeeConfiguration, TransactionRequest, UrlKind},
    prompt::Prompt,
    registry::DeploymentRegistry,
    rpc::{send_and_wait, RPC},
    waiter::await_success,
};

#[derive(Debug, PartialEq, Eq)]
pub enum DeployState {
    Attempting { attempt: u32 },
    Confirmed(DeployedContract),
    Failed { attempt: u32, error: String },
    Aborted,
}

/// Deploys the artifact from `deployer` and waits for the creation receipt
pub async fn deploy_contract<T: RPC>(
    rpc: &T,
    deployer: &str,
    artifact: &ContractArtifact,
    init_count: u128,
    fees: Option<FeeConfiguration>,
) -> eyre::Result<DeployedContract> {
    let chain_id = rpc.chain_id().await?;
    let tx = TransactionRequest::new(deployer, None, artifact.deploy_data(init_count), fees);
    let receipt = await_success(send_and_wait(rpc, tx)).await?;
    let address = receipt.contract_address.ok_or(eyre::eyre!(
        "receipt of {} has no contract address",
        receipt.transaction_hash
    ))?;
    Ok(DeployedContract {
        address,
        tx_hash: receipt.transaction_hash,
        gas_price: receipt.effective_gas_price,
        deployer: receipt.from,
        chain_id,
    })
}

pub async fn deploy_counter<T: RPC>(
    rpc: &T,
    deployer: &str,
    artifact: &ContractArtifact,
    fees: Option<FeeConfiguration>,
) -> eyre::Result<DeployedContract> {
    deploy_contract(rpc, deployer, artifact, INIT_COUNT, fees).await
}

/// Runs deploy attempts until one is confirmed or the operator stops retrying
///
/// The registry is only touched after a confirmed deployment and only when the operator
/// accepts the update, in which case it is persisted right away.
pub async fn track<F, Fut, P>(
    mut deploy: F,
    name: &str,
    registry: &mut DeploymentRegistry,
    prompt: &mut P,
) -> eyre::Result<DeployedContract>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = eyre::Result<DeployedContract>>,
    P: Prompt + ?Sized,
{
    let mut state = DeployState::Attempting { attempt: 1 };
    loop {
        state = match state {
            DeployState::Attempting { attempt } => {
                prompt.notify(&format!("Deploying {name} (attempt {attempt}) ..."));
                info!(name, attempt, "deploy attempt");
                match deploy().await {
                    Ok(deployed) => DeployState::Confirmed(deployed),
                    Err(error) => DeployState::Failed {
                        attempt,
                        error: error.to_string(),
                    },
                }
            }
            DeployState::Failed { attempt, error } => {
                warn!(name, attempt, %error, "deploy attempt failed");
                prompt.notify(&format!("Failed to deploy {name} contract, error: {error}"));
                if prompt.confirm("Retry?")? {
                    DeployState::Attempting {
                        attempt: attempt + 1,
                    }
                } else {
                    DeployState::Aborted
                }
            }
            DeployState::Aborted => {
                return Err(ConsoleError::DeploymentAborted {
                    name: name.to_string(),
                }
                .into())
            }
            DeployState::Confirmed(deployed) => {
                report_deployment(name, &deployed, prompt);
                offer_registry_update(name, &deployed, registry, prompt)?;
                return Ok(deployed);
            }
        };
    }
}

fn report_deployment<P: Prompt + ?Sized>(name: &str, deployed: &DeployedContract, prompt: &mut P) {
    let chain_id = deployed.chain_id;
    prompt.notify(&format!(
        "{name} address: {}",
        explorer_url(chain_id, UrlKind::Address, &deployed.address)
    ));
    prompt.notify(&format!(
        "{name} transaction: {}",
        explorer_url(chain_id, UrlKind::Tx, &deployed.tx_hash)
    ));
    if let Some(gas_price) = deployed.gas_price {
        prompt.notify(&format!("Gas price: {gas_price} wei"));
    }
    prompt.notify(&format!("Deployer address: {} \n", deployed.deployer));
    info!(name, address = %deployed.address, tx_hash = %deployed.tx_hash, "deployment confirmed");
}

// Failures here are reported and leave both memory and disk untouched, the deployment stands
fn offer_registry_update<P: Prompt + ?Sized>(
    name: &str,
    deployed: &DeployedContract,
    registry: &mut DeploymentRegistry,
    prompt: &mut P,
) -> eyre::Result<()> {
    let file = registry
        .path()
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    let query = format!("Update '{file}' with new {name} address {}?", deployed.address);
    if !prompt.confirm(&query)? {
        return Ok(());
    }
    let mut updated = registry.clone();
    if let Err(error) = updated.upsert_for_chain(deployed.chain_id, name, &deployed.address) {
        prompt.notify(&format!("Failed to update '{file}', error: {error}"));
        return Ok(());
    }
    match updated.persist() {
        Ok(()) => *registry = updated,
        Err(error) => prompt.notify(&format!("Failed to update '{file}', error: {error}")),
    }
    Ok(())
}
