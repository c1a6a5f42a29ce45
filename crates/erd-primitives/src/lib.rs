/// erd SDK - Cryptographic primitives and value types.
///
/// This crate provides the foundational building blocks for the erd SDK:
/// - Addresses (bech32 with the `erd` prefix)
/// - Ed25519 secret keys, public keys and signatures
/// - BIP-39 mnemonics with SLIP-10 key derivation
/// - PEM key files
/// - Token amounts with 18-decimal denomination
/// - Hash functions (SHA-256, SHA-512, Keccak-256, HMAC)

pub mod address;
pub mod balance;
pub mod ed25519;
pub mod hash;
pub mod mnemonic;
pub mod pem;
pub mod signable;

mod error;
pub use address::Address;
pub use balance::Balance;
pub use ed25519::{PublicKey, SecretKey, Signature};
pub use error::PrimitivesError;
pub use mnemonic::Mnemonic;
pub use signable::Signable;
