//! Detached Ed25519 signatures.

use std::fmt;

use crate::PrimitivesError;

/// Length of a populated signature in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// A detached Ed25519 signature.
///
/// The empty signature represents the unsigned state of a transaction or
/// message; any non-empty signature is exactly 64 bytes.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Signature {
    bytes: Vec<u8>,
}

impl Signature {
    /// The empty (absent) signature.
    pub fn empty() -> Self {
        Signature { bytes: Vec::new() }
    }

    /// Create a signature from raw bytes.
    ///
    /// # Arguments
    /// * `bytes` - Exactly 64 signature bytes.
    ///
    /// # Returns
    /// `Ok(Signature)` or `InvalidSignature` if the length is wrong.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(PrimitivesError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                SIGNATURE_LEN,
                bytes.len()
            )));
        }
        Ok(Signature {
            bytes: bytes.to_vec(),
        })
    }

    /// Create a signature from a 128-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Whether the signature is absent.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercase hex; empty string for the empty signature.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// The raw signature bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<ed25519_dalek::Signature> for Signature {
    fn from(sig: ed25519_dalek::Signature) -> Self {
        Signature {
            bytes: sig.to_bytes().to_vec(),
        }
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}
