use std::time::Duration;

use alloy::{
    network::{ReceiptResponse, TransactionBuilder},
    primitives::{Address, TxHash},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::{TransactionReceipt, TransactionRequest as EthTransactionRequest},
    transports::{http::reqwest::Url, RpcError},
};
use async_trait::async_trait;
use tracing::debug;

use crate::{
    error::ConsoleError,
    object::{FeeHints, Receipt, TransactionRequest},
    wallet::HdWallets,
};

const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// The blockchain node the console talks to
#[async_trait]
pub trait RPC: Clone + Send + Sync {
    async fn chain_id(&self) -> Result<u64, ConsoleError>;

    /// Addresses the console can send from
    async fn accounts(&self) -> Result<Vec<String>, ConsoleError>;

    async fn fee_hints(&self) -> Result<FeeHints, ConsoleError>;

    /// Broadcasts the transaction and returns its hash
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<String, ConsoleError>;

    /// `None` while the transaction is not mined
    async fn transaction_receipt(&self, tx_hash: &str) -> Result<Option<Receipt>, ConsoleError>;

    async fn call(&self, to: &str, data: Vec<u8>) -> Result<Vec<u8>, ConsoleError>;

    fn poll_interval(&self) -> Duration {
        RECEIPT_POLL_INTERVAL
    }
}

/// A broadcast transaction waiting to be mined
pub struct PendingTransaction<'a, T: RPC> {
    rpc: &'a T,
    pub tx_hash: String,
}

impl<'a, T: RPC> PendingTransaction<'a, T> {
    pub async fn submit(rpc: &'a T, tx: TransactionRequest) -> Result<Self, ConsoleError> {
        let tx_hash = rpc.send_transaction(tx).await?;
        debug!(%tx_hash, "transaction broadcast");
        Ok(Self { rpc, tx_hash })
    }

    // No deadline here, the node decides when a transaction is dropped
    pub async fn wait(self) -> Result<Receipt, ConsoleError> {
        loop {
            if let Some(receipt) = self.rpc.transaction_receipt(&self.tx_hash).await? {
                debug!(tx_hash = %self.tx_hash, status = receipt.status, "transaction mined");
                return Ok(receipt);
            }
            tokio::time::sleep(self.rpc.poll_interval()).await;
        }
    }
}

/// Submits and waits in one future, the shape consumed by the transaction waiter
pub async fn send_and_wait<T: RPC>(rpc: &T, tx: TransactionRequest) -> Result<Receipt, ConsoleError> {
    PendingTransaction::submit(rpc, tx).await?.wait().await
}

/// Node client backed by an alloy provider
///
/// With wallets every transaction is signed locally by the signer matching its `from`,
/// without them the node signs with its own unlocked accounts.
#[derive(Clone)]
pub struct RpcClient {
    provider: DynProvider,
    url: String,
    signers: Vec<Address>,
}

impl RpcClient {
    pub fn connect(url: &str, wallets: Option<&HdWallets>) -> eyre::Result<Self> {
        let endpoint: Url = url.parse()?;
        let wallet = wallets.and_then(|wallets| {
            let wallet = wallets.ethereum_wallet()?;
            Some((wallet, wallets.addresses()))
        });
        let (provider, signers) = match wallet {
            Some((wallet, signers)) => (
                ProviderBuilder::new()
                    .wallet(wallet)
                    .connect_http(endpoint)
                    .erased(),
                signers,
            ),
            None => (ProviderBuilder::new().connect_http(endpoint).erased(), Vec::new()),
        };
        provider.client().set_poll_interval(RECEIPT_POLL_INTERVAL);
        debug!(url, signers = signers.len(), "rpc client connected");
        Ok(Self {
            provider,
            url: url.to_string(),
            signers,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn parse_address(value: &str) -> Result<Address, ConsoleError> {
    value
        .parse()
        .map_err(|e| ConsoleError::Provider(format!("invalid address {value}: {e}")))
}

fn parse_tx_hash(value: &str) -> Result<TxHash, ConsoleError> {
    value
        .parse()
        .map_err(|e| ConsoleError::Provider(format!("invalid transaction hash {value}: {e}")))
}

impl From<TransactionReceipt> for Receipt {
    fn from(receipt: TransactionReceipt) -> Self {
        Receipt {
            transaction_hash: receipt.transaction_hash.to_string(),
            from: receipt.from.to_string(),
            to: receipt.to.map(|to| to.to_string()),
            contract_address: receipt.contract_address.map(|address| address.to_string()),
            status: receipt.status(),
            gas_used: receipt.gas_used,
            effective_gas_price: Some(receipt.effective_gas_price),
            block_number: receipt.block_number.unwrap_or_default(),
        }
    }
}

fn eth_transaction(tx: TransactionRequest) -> Result<EthTransactionRequest, ConsoleError> {
    let request = EthTransactionRequest::default().with_from(parse_address(&tx.from)?);
    let mut request = match tx.to.as_deref() {
        Some(to) => request.with_to(parse_address(to)?).with_input(tx.data),
        None => request.with_deploy_code(tx.data),
    };
    if let Some(fee) = tx.fees.max_fee_per_gas {
        request.set_max_fee_per_gas(fee);
    }
    if let Some(fee) = tx.fees.max_priority_fee_per_gas {
        request.set_max_priority_fee_per_gas(fee);
    }
    if let Some(gas) = tx.fees.gas_limit {
        request.set_gas_limit(gas);
    }
    Ok(request)
}

#[async_trait]
impl RPC for RpcClient {
    async fn chain_id(&self) -> Result<u64, ConsoleError> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn accounts(&self) -> Result<Vec<String>, ConsoleError> {
        let accounts = if self.signers.is_empty() {
            self.provider.get_accounts().await?
        } else {
            self.signers.clone()
        };
        Ok(accounts.iter().map(Address::to_string).collect())
    }

    async fn fee_hints(&self) -> Result<FeeHints, ConsoleError> {
        match self.provider.estimate_eip1559_fees().await {
            Ok(estimate) => Ok(FeeHints {
                max_fee_per_gas: Some(estimate.max_fee_per_gas),
                max_priority_fee_per_gas: Some(estimate.max_priority_fee_per_gas),
            }),
            // legacy chains report no base fee
            Err(RpcError::UnsupportedFeature(feature)) => {
                debug!(feature, "node gives no fee hints");
                Ok(FeeHints::default())
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<String, ConsoleError> {
        let pending = self.provider.send_transaction(eth_transaction(tx)?).await?;
        Ok(pending.tx_hash().to_string())
    }

    async fn transaction_receipt(&self, tx_hash: &str) -> Result<Option<Receipt>, ConsoleError> {
        let receipt = self
            .provider
            .get_transaction_receipt(parse_tx_hash(tx_hash)?)
            .await?;
        Ok(receipt.map(Receipt::from))
    }

    async fn call(&self, to: &str, data: Vec<u8>) -> Result<Vec<u8>, ConsoleError> {
        let request = EthTransactionRequest::default()
            .with_to(parse_address(to)?)
            .with_input(data);
        Ok(self.provider.call(request).await?.to_vec())
    }
}
