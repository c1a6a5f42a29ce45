/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The transaction has no signature and cannot be submitted.
    #[error("transaction is not signed")]
    NotSigned,
    /// The data payload could not be decoded.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
    /// A plain (JSON) transaction could not be converted.
    #[error("invalid plain transaction: {0}")]
    InvalidPlainTransaction(String),
    /// An error occurred during JSON serialization.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// An underlying primitives error (forwarded from `erd-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] erd_primitives::PrimitivesError),
}
