#![deny(missing_docs)]

//! erd SDK - Message signing and verification.
//!
//! Messages are signed over a Keccak-256 hash of a fixed prefix and the
//! message bytes, and verified against the claimed signer's public key.

mod error;
pub mod message;
pub mod verifier;

pub use error::MessageError;
pub use message::{Message, PlainMessage};
pub use verifier::UserVerifier;
