//! Aggregate error type of the SDK facade.

use std::error::Error;

use erd_message::MessageError;
use erd_network::{NetworkError, ProviderError};
use erd_primitives::PrimitivesError;
use erd_transaction::TransactionError;
use erd_wallet::WalletError;

/// Any error raised by an SDK component.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Keys, addresses, amounts or encodings.
    #[error("primitives error: {0}")]
    Primitives(#[from] PrimitivesError),

    /// Building or serializing a transaction.
    #[error("transaction error: {0}")]
    Transaction(#[from] TransactionError),

    /// Keystores and signers.
    #[error("wallet error: {0}")]
    Wallet(#[from] WalletError),

    /// Message signing and verification.
    #[error("message error: {0}")]
    Message(#[from] MessageError),

    /// A provider request.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Watchers and timers.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),
}

/// Render an error and its chain of causes, outermost first.
pub fn summary(err: &(dyn Error + 'static)) -> Vec<String> {
    let mut lines = vec![err.to_string()];
    let mut cause = err.source();
    while let Some(inner) = cause {
        lines.push(inner.to_string());
        cause = inner.source();
    }
    lines
}
