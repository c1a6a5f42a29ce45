/// Error types for wallet operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("MAC mismatch, possibly wrong password")]
    MacMismatch,
    #[error("corrupt keystore: {0}")]
    CorruptKeystore(String),
    #[error("unsupported cipher: {0}")]
    UnsupportedCipher(String),
    #[error("unsupported key derivation function: {0}")]
    UnsupportedKdf(String),
    #[error("invalid key derivation parameters: {0}")]
    InvalidKdfParams(String),
    #[error("keystore belongs to {expected}, but decrypted key belongs to {actual}")]
    WrongAccount { expected: String, actual: String },
    #[error("signer cannot sign")]
    CannotSign(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("device error: {0}")]
    Device(String),
    #[error("keystore JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("primitives error: {0}")]
    Primitives(#[from] erd_primitives::PrimitivesError),
}

impl WalletError {
    /// Wrap any error as the cause of a failed signing attempt.
    pub fn cannot_sign<E>(cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        WalletError::CannotSign(Box::new(cause))
    }
}
