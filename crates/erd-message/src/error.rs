/// Error types for message operations.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// The signature or key is malformed; wraps the cause.
    #[error("verifier cannot verify message")]
    CannotVerify(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// A plain message field is malformed.
    #[error("invalid plain message: {0}")]
    InvalidPlainMessage(String),
    /// An underlying primitives error.
    #[error("{0}")]
    Primitives(#[from] erd_primitives::PrimitivesError),
}
