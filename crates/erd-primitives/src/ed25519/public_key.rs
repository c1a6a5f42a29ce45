//! Ed25519 public keys.

use ed25519_dalek::{Verifier, VerifyingKey};

use crate::address::Address;
use crate::ed25519::signature::{Signature, SIGNATURE_LEN};
use crate::PrimitivesError;

/// Length of a public key in bytes.
pub const PUBLIC_KEY_LEN: usize = 32;

/// An Ed25519 public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey {
    bytes: [u8; PUBLIC_KEY_LEN],
}

impl PublicKey {
    /// Create a public key from raw bytes.
    ///
    /// # Arguments
    /// * `bytes` - Exactly 32 bytes.
    ///
    /// # Returns
    /// `Ok(PublicKey)` or `InvalidKeyLength`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let bytes: [u8; PUBLIC_KEY_LEN] =
            bytes
                .try_into()
                .map_err(|_| PrimitivesError::InvalidKeyLength {
                    expected: PUBLIC_KEY_LEN,
                    got: bytes.len(),
                })?;
        Ok(PublicKey { bytes })
    }

    /// Create a public key from a hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// The public key of an account, which is its address payload.
    pub fn from_address(address: &Address) -> Self {
        PublicKey {
            bytes: *address.as_bytes(),
        }
    }

    /// The address owned by this key.
    pub fn to_address(&self) -> Address {
        Address::from_bytes(&self.bytes).expect("public keys are 32 bytes")
    }

    /// Verify a detached signature over `message`.
    ///
    /// # Arguments
    /// * `message` - The exact bytes that were signed.
    /// * `signature` - The 64-byte signature.
    ///
    /// # Returns
    /// `Ok(true)` if valid, `Ok(false)` on mismatch, or an error if the
    /// signature or the key bytes are malformed.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<bool, PrimitivesError> {
        let sig_bytes: [u8; SIGNATURE_LEN] = signature.as_bytes().try_into().map_err(|_| {
            PrimitivesError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                SIGNATURE_LEN,
                signature.as_bytes().len()
            ))
        })?;
        let key = VerifyingKey::from_bytes(&self.bytes)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
        let sig = ed25519_dalek::Signature::from_bytes(&sig_bytes);
        Ok(key.verify(message, &sig).is_ok())
    }

    /// Lowercase hex of the key bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.bytes
    }
}
