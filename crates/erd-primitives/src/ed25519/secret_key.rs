//! Ed25519 secret keys.
//!
//! A secret key is the 32-byte Ed25519 seed. The expanded signing key is
//! rebuilt on demand and never stored.

use std::fmt;

use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use crate::ed25519::public_key::PublicKey;
use crate::ed25519::signature::Signature;
use crate::PrimitivesError;

/// Length of a secret key seed in bytes.
pub const SECRET_KEY_LEN: usize = 32;

/// An Ed25519 secret key (seed).
///
/// The seed is zeroized on drop and redacted from `Debug` output.
#[derive(Clone)]
pub struct SecretKey {
    seed: [u8; SECRET_KEY_LEN],
}

impl SecretKey {
    /// Generate a new random secret key from the OS random number generator.
    ///
    /// # Returns
    /// A new `SecretKey`.
    pub fn generate() -> Self {
        let mut seed = [0u8; SECRET_KEY_LEN];
        OsRng.fill_bytes(&mut seed);
        SecretKey { seed }
    }

    /// Create a secret key from raw seed bytes.
    ///
    /// # Arguments
    /// * `bytes` - Exactly 32 seed bytes.
    ///
    /// # Returns
    /// `Ok(SecretKey)` or `InvalidKeyLength`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let seed: [u8; SECRET_KEY_LEN] =
            bytes
                .try_into()
                .map_err(|_| PrimitivesError::InvalidKeyLength {
                    expected: SECRET_KEY_LEN,
                    got: bytes.len(),
                })?;
        Ok(SecretKey { seed })
    }

    /// Create a secret key from a 64-character hex string.
    ///
    /// # Arguments
    /// * `hex_str` - Hex encoding of the 32-byte seed.
    ///
    /// # Returns
    /// `Ok(SecretKey)` or an error if the hex or the length is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let mut bytes = hex::decode(hex_str)?;
        let key = Self::from_bytes(&bytes);
        bytes.zeroize();
        key
    }

    /// Derive the matching public key.
    pub fn generate_public_key(&self) -> PublicKey {
        let signing = SigningKey::from_bytes(&self.seed);
        PublicKey::from_bytes(signing.verifying_key().as_bytes())
            .expect("verifying keys are 32 bytes")
    }

    /// Sign raw bytes.
    ///
    /// Ed25519 is deterministic: the same key and message always produce
    /// the same signature.
    ///
    /// # Arguments
    /// * `message` - The exact bytes to sign.
    ///
    /// # Returns
    /// A 64-byte `Signature`.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let signing = SigningKey::from_bytes(&self.seed);
        signing.sign(message).into()
    }

    /// Hex encoding of the seed. The caller is responsible for the result.
    pub fn to_hex(&self) -> String {
        hex::encode(self.seed)
    }

    /// Write the key as a single-block PEM file labelled with its address.
    pub fn to_pem(&self) -> String {
        crate::pem::to_pem(self)
    }

    /// The raw seed bytes.
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_LEN] {
        &self.seed
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.seed == other.seed
    }
}

impl Eq for SecretKey {}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.seed.zeroize();
    }
}
