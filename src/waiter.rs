use std::future::Future;

use tracing::debug;

use crate::{error::ConsoleError, object::Receipt};

const REASON_STRING_PREFIX: &str =
    "VM Exception while processing transaction: reverted with reason string ";
const CUSTOM_ERROR_PREFIX: &str =
    "VM Exception while processing transaction: reverted with custom error ";

/// Settles a submitted transaction and requires a successful receipt
pub async fn await_success<F>(pending: F) -> Result<Receipt, ConsoleError>
where
    F: Future<Output = Result<Receipt, ConsoleError>>,
{
    let receipt = pending.await?;
    if !receipt.status {
        return Err(ConsoleError::TxReverted {
            tx_hash: receipt.transaction_hash,
        });
    }
    debug!(
        tx_hash = %receipt.transaction_hash,
        gas_used = receipt.gas_used,
        "transaction succeeded"
    );
    Ok(receipt)
}

/// Succeeds only when submitting or mining fails, optionally with the given bare reason
pub async fn await_expected_failure<F>(
    pending: F,
    expected_reason: Option<&str>,
) -> Result<(), ConsoleError>
where
    F: Future<Output = Result<Receipt, ConsoleError>>,
{
    let error = match await_success(pending).await {
        Ok(_) => return Err(ConsoleError::UnexpectedSuccess),
        Err(error) => error,
    };
    let Some(expected) = expected_reason else {
        return Ok(());
    };
    let actual = failure_reason(&error);
    if actual != expected {
        return Err(ConsoleError::WrongFailureReason {
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}

/// Strips the node's revert wording so string reasons and custom errors compare the same way,
/// e.g. `...reverted with custom error 'MsgNeedsAddr()'` becomes `MsgNeedsAddr`
pub fn failure_reason(error: &ConsoleError) -> String {
    let message = match error {
        ConsoleError::Provider(message) => message.clone(),
        other => other.to_string(),
    };
    let cause = message
        .replace(REASON_STRING_PREFIX, "")
        .replace(CUSTOM_ERROR_PREFIX, "")
        .replacen("()", "", 1);
    cause
        .strip_prefix('\'')
        .and_then(|c| c.strip_suffix('\''))
        .unwrap_or(cause.as_str())
        .to_string()
}
