//! Signers: objects holding (or fronting) a secret key that sign
//! [`Signable`] payloads on behalf of one address.

use std::future::Future;

use tracing::debug;

use erd_primitives::{pem, Address, SecretKey, Signable};

use crate::keystore::EncryptedKeystore;
use crate::WalletError;

/// Signs payloads on behalf of a single address.
pub trait Signer {
    /// The address whose key signs.
    fn get_address(&self) -> impl Future<Output = Result<Address, WalletError>> + Send;

    /// Serialize `signable`, sign the payload and apply the signature.
    ///
    /// Failures are reported as `CannotSign` wrapping the cause.
    fn sign<S: Signable + Send>(
        &self,
        signable: &mut S,
    ) -> impl Future<Output = Result<(), WalletError>> + Send;
}

/// A signer backed by a secret key held in memory.
#[derive(Clone, Debug)]
pub struct UserSigner {
    secret_key: SecretKey,
}

impl UserSigner {
    /// Create a signer from a secret key.
    pub fn new(secret_key: SecretKey) -> Self {
        UserSigner { secret_key }
    }

    /// Create a signer from the key at `index` in a PEM file.
    pub fn from_pem(text: &str, index: usize) -> Result<Self, WalletError> {
        Ok(Self::new(pem::parse_user_key(text, index)?))
    }

    /// Create a signer from an encrypted key file.
    pub fn from_keystore(keystore: &EncryptedKeystore, password: &str) -> Result<Self, WalletError> {
        Ok(Self::new(keystore.decrypt(password)?))
    }

    /// The signer's address.
    pub fn address(&self) -> Address {
        self.secret_key.generate_public_key().to_address()
    }

    /// Sign without suspending.
    pub fn sign_now<S: Signable>(&self, signable: &mut S) -> Result<(), WalletError> {
        let address = self.address();
        let payload = signable
            .serialize_for_signing(&address)
            .map_err(WalletError::cannot_sign)?;
        let signature = self.secret_key.sign(&payload);
        signable.apply_signature(signature, &address);
        debug!(%address, "signed payload");
        Ok(())
    }
}

impl Signer for UserSigner {
    async fn get_address(&self) -> Result<Address, WalletError> {
        Ok(self.address())
    }

    async fn sign<S: Signable + Send>(&self, signable: &mut S) -> Result<(), WalletError> {
        self.sign_now(signable)
    }
}
