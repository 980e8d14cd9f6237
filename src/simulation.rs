//! In-process stand-ins for the node and the operator, used by unit and scenario tests

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use async_trait::async_trait;

use crate::{
    error::ConsoleError,
    object::{FeeHints, Receipt, TransactionRequest},
    prompt::Prompt,
    rpc::RPC,
};

pub const FAKE_GAS_PRICE: u128 = 1_000_000_000;

/// What the fake node does with the next submitted transaction
#[derive(Clone, Debug)]
pub enum FakeOutcome {
    Mine,
    Revert,
    Reject(String),
}

#[derive(Default)]
struct FakeState {
    outcomes: VecDeque<FakeOutcome>,
    receipts: HashMap<String, Receipt>,
    sent: Vec<TransactionRequest>,
    nonce: u64,
    call_output: Vec<u8>,
}

#[derive(Clone)]
pub struct FakeRpcClient {
    chain_id: u64,
    accounts: Vec<String>,
    fee_hints: FeeHints,
    state: Arc<Mutex<FakeState>>,
}

impl FakeRpcClient {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            accounts: vec![
                "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266".to_string(),
                "0x70997970c51812dc3a010c7d01b50e0d17dc79c8".to_string(),
            ],
            fee_hints: FeeHints::default(),
            state: Arc::default(),
        }
    }

    pub fn with_accounts(mut self, accounts: Vec<String>) -> Self {
        self.accounts = accounts;
        self
    }

    pub fn with_fee_hints(mut self, fee_hints: FeeHints) -> Self {
        self.fee_hints = fee_hints;
        self
    }

    /// Queues outcomes for upcoming transactions, later ones are mined
    pub fn push_outcomes<I: IntoIterator<Item = FakeOutcome>>(&self, outcomes: I) {
        self.state().outcomes.extend(outcomes);
    }

    pub fn set_call_output(&self, output: Vec<u8>) {
        self.state().call_output = output;
    }

    pub fn sent_transactions(&self) -> Vec<TransactionRequest> {
        self.state().sent.clone()
    }

    /// Address given to the contract created by the `nonce`-th submitted transaction
    pub fn contract_address(nonce: u64) -> String {
        format!("0x{:040x}", 0xc0de_0000_u64 + nonce)
    }

    pub fn tx_hash(nonce: u64) -> String {
        format!("0x{nonce:064x}")
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl RPC for FakeRpcClient {
    async fn chain_id(&self) -> Result<u64, ConsoleError> {
        Ok(self.chain_id)
    }

    async fn accounts(&self) -> Result<Vec<String>, ConsoleError> {
        Ok(self.accounts.clone())
    }

    async fn fee_hints(&self) -> Result<FeeHints, ConsoleError> {
        Ok(self.fee_hints)
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<String, ConsoleError> {
        let mut state = self.state();
        state.sent.push(tx.clone());
        let outcome = state.outcomes.pop_front().unwrap_or(FakeOutcome::Mine);
        if let FakeOutcome::Reject(message) = outcome {
            return Err(ConsoleError::Provider(message));
        }
        state.nonce += 1;
        let nonce = state.nonce;
        let status = matches!(outcome, FakeOutcome::Mine);
        let receipt = Receipt {
            transaction_hash: Self::tx_hash(nonce),
            from: tx.from,
            contract_address: (tx.to.is_none() && status).then(|| Self::contract_address(nonce)),
            to: tx.to,
            status,
            gas_used: 21000,
            effective_gas_price: Some(FAKE_GAS_PRICE),
            block_number: nonce,
        };
        state.receipts.insert(receipt.transaction_hash.clone(), receipt);
        Ok(Self::tx_hash(nonce))
    }

    async fn transaction_receipt(&self, tx_hash: &str) -> Result<Option<Receipt>, ConsoleError> {
        Ok(self.state().receipts.get(tx_hash).cloned())
    }

    async fn call(&self, _: &str, _: Vec<u8>) -> Result<Vec<u8>, ConsoleError> {
        Ok(self.state().call_output.clone())
    }

    fn poll_interval(&self) -> Duration {
        Duration::ZERO
    }
}

/// Replays queued operator answers and records everything shown to the operator
///
/// `confirm` takes `y`/`n`, `select` takes the item text, its 1-based number, or `cancel`.
#[derive(Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    questions: Vec<String>,
    output: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn remaining_answers(&self) -> usize {
        self.answers.len()
    }

    fn next_answer(&mut self, query: &str) -> eyre::Result<String> {
        self.questions.push(query.to_string());
        self.answers
            .pop_front()
            .ok_or(eyre::eyre!("no scripted answer for `{query}`"))
    }
}

impl Prompt for ScriptedPrompt {
    fn input(&mut self, query: &str, _: Option<&str>) -> eyre::Result<String> {
        self.next_answer(query)
    }

    fn confirm(&mut self, query: &str) -> eyre::Result<bool> {
        match self.next_answer(query)?.as_str() {
            "y" | "yes" => Ok(true),
            "n" | "no" => Ok(false),
            other => Err(eyre::eyre!("`{other}` is not a yes/no answer")),
        }
    }

    fn select(&mut self, query: &str, items: &[&str]) -> eyre::Result<Option<usize>> {
        let answer = self.next_answer(query)?;
        if answer == "cancel" {
            return Ok(None);
        }
        if let Some(index) = items.iter().position(|item| *item == answer) {
            return Ok(Some(index));
        }
        match answer.parse::<usize>() {
            Ok(number) if (1..=items.len()).contains(&number) => Ok(Some(number - 1)),
            _ => Err(eyre::eyre!("`{answer}` is not one of {items:?}")),
        }
    }

    fn notify(&mut self, message: &str) {
        self.output.push(message.to_string());
    }
}
