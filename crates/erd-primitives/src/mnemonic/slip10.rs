//! SLIP-10 hierarchical derivation for Ed25519.
//!
//! Ed25519 only supports hardened children, so every path segment is
//! hardened.

use zeroize::Zeroize;

use crate::hash::sha512_hmac;
use crate::PrimitivesError;

/// HMAC key for master key generation on the Ed25519 curve.
const ED25519_CURVE_SEED: &[u8] = b"ed25519 seed";

/// Offset added to an index to make it hardened.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Registered coin type of the network.
pub const COIN_TYPE: u32 = 508;

/// BIP-44 purpose.
pub const PURPOSE: u32 = 44;

/// A derived key together with its chain code.
pub(crate) struct ExtendedKey {
    pub(crate) key: [u8; 32],
    pub(crate) chain_code: [u8; 32],
}

impl ExtendedKey {
    /// Generate the master key from a BIP-39 seed.
    pub(crate) fn master(seed: &[u8]) -> Self {
        Self::split(sha512_hmac(ED25519_CURVE_SEED, seed))
    }

    /// Derive a hardened child. `index` must be an unhardened index below 2^31.
    pub(crate) fn derive_hardened(&self, index: u32) -> Result<Self, PrimitivesError> {
        if index >= HARDENED_OFFSET {
            return Err(PrimitivesError::InvalidDerivationIndex(index));
        }

        let mut data = Vec::with_capacity(1 + 32 + 4);
        data.push(0x00);
        data.extend_from_slice(&self.key);
        data.extend_from_slice(&(index | HARDENED_OFFSET).to_be_bytes());

        let child = Self::split(sha512_hmac(&self.chain_code, &data));
        data.zeroize();
        Ok(child)
    }

    fn split(mut digest: [u8; 64]) -> Self {
        let mut key = [0u8; 32];
        let mut chain_code = [0u8; 32];
        key.copy_from_slice(&digest[..32]);
        chain_code.copy_from_slice(&digest[32..]);
        digest.zeroize();
        ExtendedKey { key, chain_code }
    }
}

impl Drop for ExtendedKey {
    fn drop(&mut self) {
        self.key.zeroize();
        self.chain_code.zeroize();
    }
}

/// Derive the key at `m/44'/508'/account'/0'/index'` from a BIP-39 seed.
pub(crate) fn derive_path(seed: &[u8], account: u32, index: u32) -> Result<[u8; 32], PrimitivesError> {
    let mut node = ExtendedKey::master(seed);
    for segment in [PURPOSE, COIN_TYPE, account, 0, index] {
        node = node.derive_hardened(segment)?;
    }
    Ok(node.key)
}
