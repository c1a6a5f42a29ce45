//! The contract between signable objects and signers.

use crate::address::Address;
use crate::ed25519::Signature;

/// An object that can be signed by a signer.
///
/// Signers call [`serialize_for_signing`](Signable::serialize_for_signing),
/// sign the returned bytes and hand the signature back through
/// [`apply_signature`](Signable::apply_signature).
pub trait Signable {
    /// Error raised while producing the signing payload.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The exact bytes to sign on behalf of `signed_by`.
    fn serialize_for_signing(&self, signed_by: &Address) -> Result<Vec<u8>, Self::Error>;

    /// Record the signature produced by `signed_by`.
    fn apply_signature(&mut self, signature: Signature, signed_by: &Address);

    /// Switch to signing a hash of the payload instead of the payload itself.
    ///
    /// Returns `false` when the object has no such mode.
    fn enable_hash_signing(&mut self) -> bool {
        false
    }
}
