//! Ed25519 keys and signatures.
//!
//! Keys are 32-byte seeds (secret) and 32-byte curve points (public);
//! signatures are detached 64-byte Ed25519 signatures.

pub mod public_key;
pub mod secret_key;
pub mod signature;

pub use public_key::PublicKey;
pub use secret_key::SecretKey;
pub use signature::Signature;
