//! BIP-39 mnemonics and Ed25519 key derivation.
//!
//! Mnemonics are 24 English words. Keys are derived from the mnemonic
//! seed with SLIP-10 along `m/44'/508'/account'/0'/index'`.

mod slip10;

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use crate::ed25519::SecretKey;
use crate::PrimitivesError;

pub use slip10::{COIN_TYPE, HARDENED_OFFSET, PURPOSE};

/// Number of words in a mnemonic.
pub const MNEMONIC_WORDS: usize = 24;

/// Entropy behind a 24-word mnemonic, in bytes.
const ENTROPY_LEN: usize = 32;

/// A validated 24-word BIP-39 mnemonic.
#[derive(Clone)]
pub struct Mnemonic {
    inner: bip39::Mnemonic,
}

impl Mnemonic {
    /// Generate a new mnemonic from 256 bits of OS entropy.
    ///
    /// # Returns
    /// A fresh 24-word `Mnemonic`.
    pub fn generate() -> Result<Self, PrimitivesError> {
        let mut entropy = [0u8; ENTROPY_LEN];
        OsRng.fill_bytes(&mut entropy);
        let inner = bip39::Mnemonic::from_entropy(&entropy)
            .map_err(|e| PrimitivesError::InvalidMnemonic(e.to_string()));
        entropy.zeroize();
        Ok(Mnemonic { inner: inner? })
    }

    /// Parse and validate a mnemonic phrase.
    ///
    /// Surrounding and repeated whitespace is ignored. The phrase must hold
    /// exactly 24 words from the English wordlist with a valid checksum.
    ///
    /// # Arguments
    /// * `text` - The space-separated words.
    ///
    /// # Returns
    /// `Ok(Mnemonic)` or `InvalidMnemonic`.
    pub fn from_text(text: &str) -> Result<Self, PrimitivesError> {
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let word_count = normalized.split(' ').filter(|w| !w.is_empty()).count();
        if word_count != MNEMONIC_WORDS {
            return Err(PrimitivesError::InvalidMnemonic(format!(
                "expected {MNEMONIC_WORDS} words, got {word_count}"
            )));
        }

        let inner = bip39::Mnemonic::parse_normalized(&normalized)
            .map_err(|e| PrimitivesError::InvalidMnemonic(e.to_string()))?;
        Ok(Mnemonic { inner })
    }

    /// The mnemonic words in order.
    pub fn words(&self) -> Vec<&'static str> {
        self.inner.words().collect()
    }

    /// The 64-byte BIP-39 seed for the given passphrase.
    pub fn to_seed(&self, passphrase: &str) -> [u8; 64] {
        self.inner.to_seed(passphrase)
    }

    /// Derive the secret key at `m/44'/508'/0'/0'/index'`.
    ///
    /// # Arguments
    /// * `index` - Address index, below 2^31.
    /// * `passphrase` - Optional BIP-39 passphrase; empty for none.
    ///
    /// # Returns
    /// The derived `SecretKey`, or `InvalidDerivationIndex`.
    pub fn derive_key(&self, index: u32, passphrase: &str) -> Result<SecretKey, PrimitivesError> {
        self.derive_key_for_account(0, index, passphrase)
    }

    /// Derive the secret key at `m/44'/508'/account'/0'/index'`.
    ///
    /// # Arguments
    /// * `account` - Account index, below 2^31.
    /// * `index` - Address index, below 2^31.
    /// * `passphrase` - Optional BIP-39 passphrase; empty for none.
    ///
    /// # Returns
    /// The derived `SecretKey`, or `InvalidDerivationIndex`.
    pub fn derive_key_for_account(
        &self,
        account: u32,
        index: u32,
        passphrase: &str,
    ) -> Result<SecretKey, PrimitivesError> {
        let mut seed = self.to_seed(passphrase);
        let derived = slip10::derive_path(&seed, account, index);
        seed.zeroize();

        let mut key = derived?;
        let secret = SecretKey::from_bytes(&key);
        key.zeroize();
        secret
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Mnemonic(<redacted>)")
    }
}
