//! Password-encrypted key files.
//!
//! The secret key is stretched from the password with scrypt, encrypted with
//! AES-128-CTR and authenticated with HMAC-SHA256 over the ciphertext. The
//! JSON layout is shared with other wallets and must stay stable.

use aes::Aes128;
use ctr::cipher::{KeyIvInit, StreamCipher};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;
use zeroize::Zeroize;

use erd_primitives::hash::{sha256_hmac, verify_sha256_hmac};
use erd_primitives::SecretKey;

use crate::WalletError;

type Aes128Ctr = ctr::Ctr128BE<Aes128>;

/// Keystore format version.
pub const KEYSTORE_VERSION: u32 = 4;
/// Cipher name recorded in the keystore.
pub const CIPHER: &str = "aes-128-ctr";
/// Key derivation function recorded in the keystore.
pub const KDF: &str = "scrypt";

const SCRYPT_N: u32 = 4096;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;
const DERIVED_KEY_LEN: usize = 32;
/// Largest accepted `log2(n)`; with r = 8 this is 1 GiB of scrypt memory.
const MAX_SCRYPT_LOG_N: u32 = 20;
/// Largest accepted `r * p`.
const MAX_SCRYPT_R_P: u64 = 64;
/// Largest accepted scrypt working memory, `128 * n * r` bytes.
const MAX_SCRYPT_MEMORY: u64 = 1 << 30;
const SALT_LEN: usize = 32;
const IV_LEN: usize = 16;

/// Random inputs of an encryption: salt, IV and keystore id.
///
/// Supplying the same randomness reproduces byte-identical keystores.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Randomness {
    /// scrypt salt.
    pub salt: [u8; SALT_LEN],
    /// AES-CTR initial counter block.
    pub iv: [u8; IV_LEN],
    /// Keystore id, a UUID string.
    pub id: String,
}

impl Randomness {
    /// Draw fresh randomness from the OS random number generator.
    pub fn new() -> Self {
        let mut salt = [0u8; SALT_LEN];
        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut salt);
        OsRng.fill_bytes(&mut iv);
        Randomness {
            salt,
            iv,
            id: Uuid::new_v4().to_string(),
        }
    }
}

impl Default for Randomness {
    fn default() -> Self {
        Self::new()
    }
}

/// An encrypted key file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedKeystore {
    /// Format version.
    pub version: u32,
    /// Random UUID.
    pub id: String,
    /// Public key, hex.
    pub address: String,
    /// Bech32 address.
    pub bech32: String,
    /// Encryption parameters and payload.
    pub crypto: CryptoSection,
}

/// The `crypto` section of a key file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoSection {
    /// Encrypted `secret key || public key`, hex.
    pub ciphertext: String,
    /// Cipher parameters.
    pub cipherparams: CipherParams,
    /// Cipher name.
    pub cipher: String,
    /// Key derivation function name.
    pub kdf: String,
    /// Key derivation parameters.
    pub kdfparams: KdfParams,
    /// HMAC-SHA256 of the ciphertext, hex.
    pub mac: String,
}

/// Cipher parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherParams {
    /// Initial counter block, hex.
    pub iv: String,
}

/// scrypt parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Derived key length in bytes.
    pub dklen: usize,
    /// Salt, hex.
    pub salt: String,
    /// CPU/memory cost; a power of two.
    pub n: u32,
    /// Block size.
    pub r: u32,
    /// Parallelism.
    pub p: u32,
}

impl EncryptedKeystore {
    /// Encrypt a secret key under a password.
    ///
    /// # Arguments
    /// * `secret_key` - The key to protect.
    /// * `password` - The password.
    /// * `randomness` - Salt, IV and id to use; fresh randomness when `None`.
    ///
    /// # Returns
    /// The keystore, or an error if key stretching fails.
    pub fn encrypt(
        secret_key: &SecretKey,
        password: &str,
        randomness: Option<Randomness>,
    ) -> Result<Self, WalletError> {
        let randomness = randomness.unwrap_or_default();
        let public_key = secret_key.generate_public_key();
        let kdfparams = KdfParams {
            dklen: DERIVED_KEY_LEN,
            salt: hex::encode(randomness.salt),
            n: SCRYPT_N,
            r: SCRYPT_R,
            p: SCRYPT_P,
        };

        let mut derived = derive_key(password, &randomness.salt, &kdfparams)?;
        let mut buffer = secret_key.as_bytes().to_vec();
        buffer.extend_from_slice(public_key.as_bytes());

        if let Err(e) = apply_ctr(&derived[..16], &randomness.iv, &mut buffer) {
            derived.zeroize();
            buffer.zeroize();
            return Err(e);
        }
        // buffer now holds the ciphertext
        let mac = sha256_hmac(&derived[16..32], &buffer);
        derived.zeroize();

        debug!(id = %randomness.id, address = %public_key.to_address(), "encrypted keystore");

        Ok(EncryptedKeystore {
            version: KEYSTORE_VERSION,
            id: randomness.id,
            address: public_key.to_hex(),
            bech32: public_key.to_address().to_bech32(),
            crypto: CryptoSection {
                ciphertext: hex::encode(&buffer),
                cipherparams: CipherParams {
                    iv: hex::encode(randomness.iv),
                },
                cipher: CIPHER.to_string(),
                kdf: KDF.to_string(),
                kdfparams,
                mac: hex::encode(mac),
            },
        })
    }

    /// Decrypt the secret key.
    ///
    /// The MAC is checked before anything is decrypted.
    ///
    /// # Arguments
    /// * `password` - The password used at encryption.
    ///
    /// # Returns
    /// The secret key, `MacMismatch` for a wrong password, `CorruptKeystore`
    /// for malformed fields, or `WrongAccount` if the key does not match the
    /// recorded address.
    pub fn decrypt(&self, password: &str) -> Result<SecretKey, WalletError> {
        let crypto = &self.crypto;
        if crypto.cipher != CIPHER {
            return Err(WalletError::UnsupportedCipher(crypto.cipher.clone()));
        }
        if crypto.kdf != KDF {
            return Err(WalletError::UnsupportedKdf(crypto.kdf.clone()));
        }

        let salt = decode_field("salt", &crypto.kdfparams.salt)?;
        let iv = decode_field("iv", &crypto.cipherparams.iv)?;
        let mut ciphertext = decode_field("ciphertext", &crypto.ciphertext)?;
        let mac = decode_field("mac", &crypto.mac)?;

        debug!(id = %self.id, bech32 = %self.bech32, "decrypting keystore");

        let mut derived = derive_key(password, &salt, &crypto.kdfparams)?;
        if !verify_sha256_hmac(&derived[16..32], &ciphertext, &mac) {
            derived.zeroize();
            return Err(WalletError::MacMismatch);
        }

        let decrypted = apply_ctr(&derived[..16], &iv, &mut ciphertext);
        derived.zeroize();
        decrypted?;

        let mut seed = [0u8; 32];
        if ciphertext.len() < seed.len() {
            seed[32 - ciphertext.len()..].copy_from_slice(&ciphertext);
        } else {
            seed.copy_from_slice(&ciphertext[..32]);
        }
        ciphertext.zeroize();
        let secret_key = SecretKey::from_bytes(&seed);
        seed.zeroize();
        let secret_key = secret_key?;

        let actual = secret_key.generate_public_key().to_hex();
        if !self.address.is_empty() && !self.address.eq_ignore_ascii_case(&actual) {
            return Err(WalletError::WrongAccount {
                expected: self.address.clone(),
                actual,
            });
        }

        Ok(secret_key)
    }

    /// Serialize to compact JSON with the canonical key order.
    pub fn to_json(&self) -> Result<String, WalletError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a key file.
    pub fn from_json(json: &str) -> Result<Self, WalletError> {
        Ok(serde_json::from_str(json)?)
    }
}

fn derive_key(
    password: &str,
    salt: &[u8],
    kdfparams: &KdfParams,
) -> Result<[u8; DERIVED_KEY_LEN], WalletError> {
    if !kdfparams.n.is_power_of_two() || kdfparams.n < 2 {
        return Err(WalletError::InvalidKdfParams(format!(
            "n must be a power of two, got {}",
            kdfparams.n
        )));
    }
    if kdfparams.dklen != DERIVED_KEY_LEN {
        return Err(WalletError::InvalidKdfParams(format!(
            "dklen must be {}, got {}",
            DERIVED_KEY_LEN, kdfparams.dklen
        )));
    }

    let log_n = kdfparams.n.trailing_zeros();
    if log_n > MAX_SCRYPT_LOG_N {
        return Err(WalletError::InvalidKdfParams(format!(
            "n must be at most 2^{MAX_SCRYPT_LOG_N}, got {}",
            kdfparams.n
        )));
    }
    let (r, p) = (u64::from(kdfparams.r), u64::from(kdfparams.p));
    if r == 0 || p == 0 || r * p > MAX_SCRYPT_R_P {
        return Err(WalletError::InvalidKdfParams(format!(
            "r * p must be between 1 and {MAX_SCRYPT_R_P}, got r = {r}, p = {p}"
        )));
    }
    if 128 * u64::from(kdfparams.n) * r > MAX_SCRYPT_MEMORY {
        return Err(WalletError::InvalidKdfParams(format!(
            "n = {} with r = {r} needs more than {MAX_SCRYPT_MEMORY} bytes",
            kdfparams.n
        )));
    }

    let log_n = log_n as u8;
    let params = scrypt::Params::new(log_n, kdfparams.r, kdfparams.p, DERIVED_KEY_LEN)
        .map_err(|e| WalletError::InvalidKdfParams(e.to_string()))?;

    let mut derived = [0u8; DERIVED_KEY_LEN];
    scrypt::scrypt(password.as_bytes(), salt, &params, &mut derived)
        .map_err(|e| WalletError::InvalidKdfParams(e.to_string()))?;
    Ok(derived)
}

fn apply_ctr(key: &[u8], iv: &[u8], buffer: &mut [u8]) -> Result<(), WalletError> {
    let mut cipher = Aes128Ctr::new_from_slices(key, iv)
        .map_err(|_| WalletError::CorruptKeystore(format!("iv must be {IV_LEN} bytes")))?;
    cipher.apply_keystream(buffer);
    Ok(())
}

fn decode_field(name: &str, value: &str) -> Result<Vec<u8>, WalletError> {
    hex::decode(value).map_err(|e| WalletError::CorruptKeystore(format!("{name}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE_SECRET: &str = "413f42575f7f26fad3317a778771212fdb80245850981e48b58a4f25e344e8f9";
    const ALICE_KEYSTORE: &str = r#"{"version":4,"id":"0dc10c02-b59b-4bac-9710-6b2cfa4284ba","address":"0139472eff6886771a982f3083da5d421f24c29181e63888228dc81ca60d69e1","bech32":"erd1qyu5wthldzr8wx5c9ucg8kjagg0jfs53s8nr3zpz3hypefsdd8ssycr6th","crypto":{"ciphertext":"3af1d5e3212ca73acf019c93f245c8beb6d29f104cacd9afb4113aca07f0eb5f1047a81479ec1621a3b686e4b763cfb61d7fd09c644020279cf724e20763bd2d","cipherparams":{"iv":"6465666768696a6b6c6d6e6f70717273"},"cipher":"aes-128-ctr","kdf":"scrypt","kdfparams":{"dklen":32,"salt":"000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f","n":4096,"r":8,"p":1},"mac":"1029dcefdf5eda2b7f8eb1c3772ab760c3b1d8508298cad7c06c6f3862248e3c"}}"#;

    fn fixed_randomness() -> Randomness {
        let mut salt = [0u8; 32];
        salt.iter_mut().enumerate().for_each(|(i, b)| *b = i as u8);
        let mut iv = [0u8; 16];
        iv.iter_mut().enumerate().for_each(|(i, b)| *b = 100 + i as u8);
        Randomness {
            salt,
            iv,
            id: "0dc10c02-b59b-4bac-9710-6b2cfa4284ba".to_string(),
        }
    }

    #[test]
    fn test_encrypt_is_reproducible() {
        let key = SecretKey::from_hex(ALICE_SECRET).unwrap();
        let keystore = EncryptedKeystore::encrypt(&key, "password", Some(fixed_randomness()))
            .expect("should encrypt");
        assert_eq!(keystore.to_json().unwrap(), ALICE_KEYSTORE);
    }

    #[test]
    fn test_decrypt_known_keystore() {
        let keystore = EncryptedKeystore::from_json(ALICE_KEYSTORE).unwrap();
        let key = keystore.decrypt("password").expect("should decrypt");
        assert_eq!(key.to_hex(), ALICE_SECRET);
    }

    #[test]
    fn test_wrong_password_is_mac_mismatch() {
        let keystore = EncryptedKeystore::from_json(ALICE_KEYSTORE).unwrap();
        let err = keystore.decrypt("passw0rd").unwrap_err();
        assert!(matches!(err, WalletError::MacMismatch));
        assert_eq!(err.to_string(), "MAC mismatch, possibly wrong password");
    }

    #[test]
    fn test_tampered_ciphertext_is_mac_mismatch() {
        let mut keystore = EncryptedKeystore::from_json(ALICE_KEYSTORE).unwrap();
        keystore.crypto.ciphertext.replace_range(0..2, "00");
        assert!(matches!(
            keystore.decrypt("password"),
            Err(WalletError::MacMismatch)
        ));
    }

    #[test]
    fn test_corrupt_and_unsupported_fields() {
        let mut keystore = EncryptedKeystore::from_json(ALICE_KEYSTORE).unwrap();
        keystore.crypto.mac = "not hex".to_string();
        assert!(matches!(
            keystore.decrypt("password"),
            Err(WalletError::CorruptKeystore(_))
        ));

        let mut keystore = EncryptedKeystore::from_json(ALICE_KEYSTORE).unwrap();
        keystore.crypto.cipher = "aes-256-gcm".to_string();
        assert!(matches!(
            keystore.decrypt("password"),
            Err(WalletError::UnsupportedCipher(_))
        ));

        let mut keystore = EncryptedKeystore::from_json(ALICE_KEYSTORE).unwrap();
        keystore.crypto.kdf = "pbkdf2".to_string();
        assert!(matches!(
            keystore.decrypt("password"),
            Err(WalletError::UnsupportedKdf(_))
        ));

        let mut keystore = EncryptedKeystore::from_json(ALICE_KEYSTORE).unwrap();
        keystore.crypto.kdfparams.n = 4095;
        assert!(matches!(
            keystore.decrypt("password"),
            Err(WalletError::InvalidKdfParams(_))
        ));
    }

    /// Oversized scrypt parameters are refused before any memory is allocated.
    #[test]
    fn test_oversized_kdf_params_are_rejected() {
        let oversized = [
            ALICE_KEYSTORE.replace(r#""n":4096"#, r#""n":2147483648"#),
            ALICE_KEYSTORE.replace(r#""n":4096"#, r#""n":2097152"#),
            ALICE_KEYSTORE.replace(r#""r":8"#, r#""r":1024"#),
            ALICE_KEYSTORE.replace(r#""p":1"#, r#""p":64"#),
            ALICE_KEYSTORE.replace(r#""p":1"#, r#""p":0"#),
            ALICE_KEYSTORE
                .replace(r#""n":4096"#, r#""n":1048576"#)
                .replace(r#""r":8"#, r#""r":16"#),
        ];
        for json in &oversized {
            assert_ne!(json, ALICE_KEYSTORE);
            let keystore = EncryptedKeystore::from_json(json).unwrap();
            assert!(
                matches!(
                    keystore.decrypt("password"),
                    Err(WalletError::InvalidKdfParams(_))
                ),
                "{json}"
            );
        }
    }

    #[test]
    fn test_wrong_account_is_detected() {
        let mut keystore = EncryptedKeystore::from_json(ALICE_KEYSTORE).unwrap();
        keystore.address = "00".repeat(32);
        assert!(matches!(
            keystore.decrypt("password"),
            Err(WalletError::WrongAccount { .. })
        ));
    }

    #[test]
    fn test_fresh_randomness_differs() {
        let a = Randomness::new();
        let b = Randomness::new();
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.id, b.id);
        assert_eq!(Uuid::parse_str(&a.id).unwrap().get_version_num(), 4);
    }
}
