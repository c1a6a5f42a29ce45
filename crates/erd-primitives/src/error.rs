/// Unified error type for all primitives operations.
///
/// Covers address decoding, key handling, mnemonics, PEM files and amounts.
/// Validation failures are raised when a value is constructed, never later.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("invalid derivation index {0}: must be below 2^31")]
    InvalidDerivationIndex(u32),

    #[error("bad PEM: {0}")]
    BadPem(String),

    #[error("invalid balance: {0}")]
    InvalidBalance(String),
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
