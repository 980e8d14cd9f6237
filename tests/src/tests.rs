use std::{fs, path::Path};

use counter::CounterCall;
use counter_console::{
    await_expected_failure, await_success, send_and_wait,
    simulation::{FakeOutcome, FakeRpcClient, ScriptedPrompt},
    ConsoleConfig, ConsoleSession, DeploymentRegistry, FeeMode, TransactionRequest,
};
use serde_json::json;

const SIGNER: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

fn write_artifact(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("Counter.json");
    fs::write(
        &path,
        json!({
            "contractName": "Counter",
            "abi": [],
            "bytecode": "0x608060405234801561001057600080fd5b50",
        })
        .to_string(),
    )
    .unwrap();
    path
}

async fn run_session(
    dir: &Path,
    rpc: FakeRpcClient,
    network: &str,
    answers: &[&str],
) -> ConsoleSession<FakeRpcClient, ScriptedPrompt> {
    let registry = DeploymentRegistry::load(dir.join("deployments.json"));
    let config = ConsoleConfig {
        network: network.to_string(),
        fee_mode: FeeMode::Disabled,
        artifact_path: write_artifact(dir),
    };
    let prompt = ScriptedPrompt::new(answers.iter().copied());
    let mut session = ConsoleSession::new(rpc, prompt, registry, config);
    session.run().await.unwrap();
    assert_eq!(session.prompt().remaining_answers(), 0);
    session
}

fn read_registry(dir: &Path) -> serde_json::Value {
    serde_json::from_slice(&fs::read(dir.join("deployments.json")).unwrap()).unwrap()
}

#[tokio::test]
async fn test_deploy_twice_overwrites_address() {
    let dir = tempfile::tempdir().unwrap();
    let answers = [
        "1",
        "deploy contracts",
        "y",
        "deploy contracts",
        "y",
        "cancel",
    ];
    let session = run_session(dir.path(), FakeRpcClient::new(5), "goerli", &answers).await;

    let second = FakeRpcClient::contract_address(2);
    assert_eq!(
        read_registry(dir.path()),
        json!({
            "deployments": [
                { "network": "goerli", "contracts": [{ "name": "Counter", "address": second }] }
            ]
        })
    );
    assert_eq!(session.registry().find_address("goerli", "Counter"), Some(second.as_str()));
    assert!(session
        .prompt()
        .output()
        .contains(&format!("Counter address: https://goerli.etherscan.io/address/{second}")));
}

#[tokio::test]
async fn test_retried_deploy_commits_once() {
    let dir = tempfile::tempdir().unwrap();
    let rpc = FakeRpcClient::new(5);
    rpc.push_outcomes([
        FakeOutcome::Reject("header not found".into()),
        FakeOutcome::Revert,
    ]);
    let answers = ["1", "deploy contracts", "y", "y", "y", "cancel"];
    let session = run_session(dir.path(), rpc.clone(), "goerli", &answers).await;

    assert_eq!(rpc.sent_transactions().len(), 3);
    let deployments = session.registry().deployments();
    assert_eq!(deployments.len(), 1);
    assert_eq!(deployments[0].contracts.len(), 1);
    assert_eq!(
        deployments[0].contracts[0].address,
        FakeRpcClient::contract_address(2)
    );
    assert_eq!(
        session.prompt().questions().iter().filter(|q| *q == "Retry?").count(),
        2
    );
}

#[tokio::test]
async fn test_aborted_deploy_leaves_no_registry() {
    let dir = tempfile::tempdir().unwrap();
    let rpc = FakeRpcClient::new(5);
    rpc.push_outcomes([FakeOutcome::Reject("insufficient funds".into())]);
    let answers = ["1", "deploy contracts", "n", "cancel"];
    let session = run_session(dir.path(), rpc, "goerli", &answers).await;

    assert!(!dir.path().join("deployments.json").exists());
    assert!(session.registry().deployments().is_empty());
    assert_eq!(
        session.prompt().output().last().unwrap(),
        "Failed to deploy contracts, error: Counter deployment failed"
    );
}

#[tokio::test]
async fn test_networks_stay_sorted_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("deployments.json"),
        json!({
            "deployments": [
                { "network": "mainnet", "contracts": [{ "name": "Counter", "address": "0x01" }] },
                { "network": "optimism", "contracts": [{ "name": "Counter", "address": "0x02" }] }
            ]
        })
        .to_string(),
    )
    .unwrap();

    for (chain_id, network) in [(56, "bsc"), (80001, "polygon-mumbai"), (5, "goerli")] {
        let answers = ["1", "deploy contracts", "y", "cancel"];
        run_session(dir.path(), FakeRpcClient::new(chain_id), network, &answers).await;
    }

    let networks: Vec<String> = read_registry(dir.path())["deployments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["network"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        networks,
        vec!["bsc", "goerli", "mainnet", "optimism", "polygon-mumbai"]
    );
    let registry = DeploymentRegistry::load(dir.path().join("deployments.json"));
    assert_eq!(registry.find_address("mainnet", "Counter"), Some("0x01"));
}

#[tokio::test]
async fn test_call_defaults_to_registered_address() {
    let dir = tempfile::tempdir().unwrap();
    let answers = [
        "1",
        "deploy contracts",
        "y",
        "call contract functions",
        "",
        "setCount",
        "12",
        "cancel",
    ];
    let rpc = FakeRpcClient::new(31337);
    let session = run_session(dir.path(), rpc.clone(), "hardhat", &answers).await;

    let deployed = FakeRpcClient::contract_address(1);
    let sent = rpc.sent_transactions();
    assert_eq!(sent[1].to.as_deref(), Some(deployed.as_str()));
    assert_eq!(sent[1].data, CounterCall::SetCount(12).calldata());
    // hardhat has no explorer, the bare hash is printed
    assert_eq!(
        session.prompt().output().last().unwrap(),
        &format!("transaction: {}", FakeRpcClient::tx_hash(2))
    );
}

#[tokio::test]
async fn test_expected_failures_against_node() {
    let rpc = FakeRpcClient::new(31337);
    rpc.push_outcomes([
        FakeOutcome::Reject(
            "VM Exception while processing transaction: reverted with custom error 'MsgNeedsAddr()'"
                .into(),
        ),
        FakeOutcome::Revert,
    ]);
    let tx = TransactionRequest::new(SIGNER, Some(SIGNER), Vec::new(), None);

    await_expected_failure(send_and_wait(&rpc, tx.clone()), Some("MsgNeedsAddr"))
        .await
        .unwrap();
    await_expected_failure(send_and_wait(&rpc, tx.clone()), None)
        .await
        .unwrap();
    assert!(await_expected_failure(send_and_wait(&rpc, tx.clone()), None)
        .await
        .is_err());
    assert!(await_success(send_and_wait(&rpc, tx)).await.unwrap().status);
}
