/// erd SDK - Encrypted key files and signers.
///
/// Provides the password-encrypted keystore format, the [`Signer`]
/// contract, and signers backed by an in-memory secret key (raw, PEM or
/// keystore) or by a hardware device.

mod error;
pub mod hardware;
pub mod keystore;
pub mod signer;

pub use error::WalletError;
pub use hardware::{HardwareSigner, SigningDevice};
pub use keystore::{EncryptedKeystore, Randomness};
pub use signer::{Signer, UserSigner};

#[cfg(test)]
mod tests;
