//! Signature verification for a known account.

use erd_primitives::{Address, PublicKey, Signature};

use crate::message::Message;
use crate::MessageError;

/// Verifies signatures produced by one account.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserVerifier {
    public_key: PublicKey,
}

impl UserVerifier {
    /// Verifier for the key behind `address`.
    pub fn from_address(address: &Address) -> Self {
        UserVerifier {
            public_key: PublicKey::from_address(address),
        }
    }

    /// Verifier for a public key.
    pub fn new(public_key: PublicKey) -> Self {
        UserVerifier { public_key }
    }

    /// Check a signed message.
    ///
    /// Returns `Ok(false)` when the signature does not match, and
    /// `CannotVerify` only when the signature or key is malformed.
    pub fn verify(&self, message: &Message) -> Result<bool, MessageError> {
        self.verify_payload(&message.hash(), message.signature())
    }

    /// Check a signature over raw payload bytes.
    pub fn verify_payload(&self, payload: &[u8], signature: &Signature) -> Result<bool, MessageError> {
        self.public_key
            .verify(payload, signature)
            .map_err(|e| MessageError::CannotVerify(Box::new(e)))
    }
}
