use alloy::transports::TransportError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("{0}")]
    Provider(String),
    #[error("transaction {tx_hash} reverted")]
    TxReverted { tx_hash: String },
    #[error("expected tx to fail, but it succeeded")]
    UnexpectedSuccess,
    #[error("tx failed as expected, but unexpected reason string: expected '{expected}', got '{actual}'")]
    WrongFailureReason { expected: String, actual: String },
    #[error("{name} deployment failed")]
    DeploymentAborted { name: String },
    #[error("unsupported chainId {0}")]
    UnsupportedNetwork(u64),
}

// Error responses carry the revert reason in their message, the envelope is dropped
impl From<TransportError> for ConsoleError {
    fn from(error: TransportError) -> Self {
        match error.as_error_resp() {
            Some(payload) => ConsoleError::Provider(payload.message.to_string()),
            None => ConsoleError::Provider(error.to_string()),
        }
    }
}
