//! Hash function primitives for the erd SDK.
//!
//! Provides SHA-256, SHA-512, Keccak-256 and the HMAC variants used by
//! key derivation, keystore authentication and message signing.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};
use sha3::Keccak256;

/// Compute SHA-256 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the (pre-standard) Keccak-256 hash of the input data.
///
/// This is the variant used by the network for message hashes and
/// hash-signed transactions, not NIST SHA3-256.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte Keccak-256 digest.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute HMAC-SHA256 of data using the given key.
///
/// # Arguments
/// * `key` - The HMAC key (any length).
/// * `data` - The message to authenticate.
///
/// # Returns
/// A 32-byte HMAC-SHA256 tag.
pub fn sha256_hmac(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// Check an HMAC-SHA256 tag in constant time.
///
/// # Arguments
/// * `key` - The HMAC key (any length).
/// * `data` - The authenticated message.
/// * `tag` - The expected tag.
///
/// # Returns
/// `true` if `tag` authenticates `data` under `key`.
pub fn verify_sha256_hmac(key: &[u8], data: &[u8], tag: &[u8]) -> bool {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    mac.verify_slice(tag).is_ok()
}

/// Compute HMAC-SHA512 of data using the given key.
///
/// # Arguments
/// * `key` - The HMAC key (any length).
/// * `data` - The message to authenticate.
///
/// # Returns
/// A 64-byte HMAC-SHA512 tag.
pub fn sha512_hmac(key: &[u8], data: &[u8]) -> [u8; 64] {
    let mut mac = Hmac::<Sha512>::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    let result = mac.finalize().into_bytes();
    let mut output = [0u8; 64];
    output.copy_from_slice(&result);
    output
}
