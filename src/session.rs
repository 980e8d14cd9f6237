use std::{fmt::Display, path::PathBuf};

use counter::{decode_count, ContractArtifact, CounterCall, CounterFunction, COUNTER_NAME};
use tracing::{info, warn};

use crate::{
    fee::FeeEstimator,
    handle::{deploy_counter, track},
    network::explorer_url,
    object::{DeployedContract, FeeConfiguration, FeeMode, TransactionRequest, UrlKind},
    prompt::{ask_for_address, ask_for_number, print_invalid_input, Prompt},
    registry::DeploymentRegistry,
    rpc::{send_and_wait, RPC},
    waiter::await_success,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Usage {
    Deploy,
    Call,
}

impl Usage {
    pub const ALL: [Usage; 2] = [Usage::Deploy, Usage::Call];
}

impl Display for Usage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Usage::Deploy => write!(f, "deploy contracts"),
            Usage::Call => write!(f, "call contract functions"),
        }
    }
}

pub struct ConsoleConfig {
    /// Registry key used to look up existing addresses
    pub network: String,
    pub fee_mode: FeeMode,
    pub artifact_path: PathBuf,
}

/// Interactive loop over deploy and call actions, ends when the action menu is cancelled
pub struct ConsoleSession<T: RPC, P: Prompt> {
    rpc: T,
    prompt: P,
    registry: DeploymentRegistry,
    config: ConsoleConfig,
    signer: Option<String>,
    fees: Option<FeeConfiguration>,
}

impl<T: RPC, P: Prompt> ConsoleSession<T, P> {
    pub fn new(rpc: T, prompt: P, registry: DeploymentRegistry, config: ConsoleConfig) -> Self {
        Self {
            rpc,
            prompt,
            registry,
            config,
            signer: None,
            fees: None,
        }
    }

    pub fn registry(&self) -> &DeploymentRegistry {
        &self.registry
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn signer(&self) -> Option<&str> {
        self.signer.as_deref()
    }

    pub fn fees(&self) -> Option<FeeConfiguration> {
        self.fees
    }

    pub async fn run(&mut self) -> eyre::Result<()> {
        let signer = self.select_signer().await?;
        self.signer = Some(signer.clone());
        if self.config.fee_mode == FeeMode::Enabled {
            let hints = self.rpc.fee_hints().await?;
            self.fees = FeeEstimator::resolve(self.config.fee_mode, &hints, &mut self.prompt)?;
        }
        loop {
            let Some(usage) = self.ask_for_usage()? else {
                info!("action selection cancelled, leaving console");
                return Ok(());
            };
            let result = match usage {
                Usage::Deploy => self.deploy(&signer).await.map(|_| ()),
                Usage::Call => self.call(&signer).await,
            };
            if let Err(error) = result {
                warn!(%usage, %error, "action failed");
                self.prompt.notify(&format!("Failed to {usage}, error: {error}"));
            }
        }
    }

    async fn select_signer(&mut self) -> eyre::Result<String> {
        let accounts = self.rpc.accounts().await?;
        if accounts.is_empty() {
            return Err(eyre::eyre!(
                "no wallet to sign with, set MNEMONIC or use a node with unlocked accounts"
            ));
        }
        self.prompt.notify("Your available account wallets to use:");
        for (i, account) in accounts.iter().enumerate() {
            self.prompt.notify(&format!("{} {account}", i + 1));
        }
        let usage = format!("the wallet you wish to use (1-{})", accounts.len());
        loop {
            let number = ask_for_number(&mut self.prompt, &usage, None)?;
            match usize::try_from(number) {
                Ok(n) if (1..=accounts.len()).contains(&n) => {
                    info!(signer = %accounts[n - 1], "signer selected");
                    return Ok(accounts[n - 1].clone());
                }
                _ => print_invalid_input(&mut self.prompt, "wallet"),
            }
        }
    }

    fn ask_for_usage(&mut self) -> eyre::Result<Option<Usage>> {
        let labels = Usage::ALL.map(|usage| usage.to_string());
        let items: Vec<&str> = labels.iter().map(String::as_str).collect();
        Ok(self
            .prompt
            .select("Please enter your intended usage", &items)?
            .map(|index| Usage::ALL[index]))
    }

    async fn deploy(&mut self, signer: &str) -> eyre::Result<DeployedContract> {
        let artifact = ContractArtifact::load(&self.config.artifact_path)?;
        let artifact = &artifact;
        let rpc = &self.rpc;
        let fees = self.fees;
        track(
            || deploy_counter(rpc, signer, artifact, fees),
            COUNTER_NAME,
            &mut self.registry,
            &mut self.prompt,
        )
        .await
    }

    async fn call(&mut self, signer: &str) -> eyre::Result<()> {
        let default = self
            .registry
            .find_address(&self.config.network, COUNTER_NAME)
            .map(str::to_string);
        let address = ask_for_address(
            &mut self.prompt,
            &format!("of the {COUNTER_NAME} contract"),
            default.as_deref(),
        )?;
        let Some(call) = self.ask_for_call()? else {
            return Ok(());
        };
        if !call.function().is_mutating() {
            let output = self.rpc.call(&address, call.calldata()).await?;
            self.prompt
                .notify(&format!("current count: {}", decode_count(&output)?));
            return Ok(());
        }
        let tx = TransactionRequest::new(signer, Some(address.as_str()), call.calldata(), self.fees);
        let receipt = await_success(send_and_wait(&self.rpc, tx)).await?;
        let chain_id = self.rpc.chain_id().await?;
        info!(function = call.function().name(), tx_hash = %receipt.transaction_hash, "call confirmed");
        self.prompt.notify(&format!(
            "transaction: {}",
            explorer_url(chain_id, UrlKind::Tx, &receipt.transaction_hash)
        ));
        Ok(())
    }

    fn ask_for_call(&mut self) -> eyre::Result<Option<CounterCall>> {
        let names = CounterFunction::ALL.map(|function| function.name());
        let Some(index) = self.prompt.select("Select the function call", &names)? else {
            return Ok(None);
        };
        let call = match CounterFunction::ALL[index] {
            CounterFunction::IncrementCount => CounterCall::IncrementCount,
            CounterFunction::DecrementCount => CounterCall::DecrementCount,
            CounterFunction::SetCount => {
                CounterCall::SetCount(ask_for_number(&mut self.prompt, "count", None)?)
            }
            CounterFunction::GetCount => CounterCall::GetCount,
        };
        Ok(Some(call))
    }
}
