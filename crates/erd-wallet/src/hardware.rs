//! Signing through a hardware wallet.
//!
//! The device transport lives outside this crate; it plugs in through
//! [`SigningDevice`]. Device apps from version 1.0.11 sign the Keccak-256
//! hash of a transaction instead of its JSON.

use std::cmp::Ordering;
use std::future::Future;

use tracing::debug;

use erd_primitives::{Address, Signable, Signature};

use crate::signer::Signer;
use crate::WalletError;

/// First device app version that signs transactions by hash.
pub const MIN_VERSION_FOR_HASH_SIGNING: &str = "1.0.11";

/// A hardware device holding keys.
pub trait SigningDevice {
    /// The address of the key at `account` / `index`.
    fn get_address(
        &self,
        account: u32,
        index: u32,
    ) -> impl Future<Output = Result<Address, WalletError>> + Send;

    /// The version of the signing app running on the device.
    fn app_version(&self) -> impl Future<Output = Result<String, WalletError>> + Send;

    /// Sign a payload with the active key; `using_hash` tells the device
    /// the payload is a transaction signed by hash.
    fn sign_payload(
        &self,
        payload: &[u8],
        using_hash: bool,
    ) -> impl Future<Output = Result<Signature, WalletError>> + Send;
}

/// A signer that delegates to a [`SigningDevice`].
#[derive(Debug)]
pub struct HardwareSigner<D> {
    device: D,
    account: u32,
    address_index: u32,
}

impl<D: SigningDevice + Sync> HardwareSigner<D> {
    /// Use the key at `account` / `address_index` on `device`.
    pub fn new(device: D, account: u32, address_index: u32) -> Self {
        HardwareSigner {
            device,
            account,
            address_index,
        }
    }

    /// The underlying device.
    pub fn device(&self) -> &D {
        &self.device
    }
}

impl<D: SigningDevice + Sync> Signer for HardwareSigner<D> {
    async fn get_address(&self) -> Result<Address, WalletError> {
        self.device.get_address(self.account, self.address_index).await
    }

    async fn sign<S: Signable + Send>(&self, signable: &mut S) -> Result<(), WalletError> {
        let address = self.get_address().await.map_err(WalletError::cannot_sign)?;
        let version = self
            .device
            .app_version()
            .await
            .map_err(WalletError::cannot_sign)?;

        let using_hash = supports_hash_signing(&version) && signable.enable_hash_signing();
        let payload = signable
            .serialize_for_signing(&address)
            .map_err(WalletError::cannot_sign)?;
        let signature = self
            .device
            .sign_payload(&payload, using_hash)
            .await
            .map_err(WalletError::cannot_sign)?;

        signable.apply_signature(signature, &address);
        debug!(%address, %version, using_hash, "signed payload on device");
        Ok(())
    }
}

/// Whether a device app version signs transactions by hash.
pub fn supports_hash_signing(app_version: &str) -> bool {
    compare_versions(app_version, MIN_VERSION_FOR_HASH_SIGNING) != Ordering::Less
}

/// Compare dotted numeric versions; missing or non-numeric parts count as 0.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| -> Vec<u64> {
        v.trim()
            .split('.')
            .map(|part| part.parse().unwrap_or(0))
            .collect()
    };
    let (a, b) = (parse(a), parse(b));
    let len = a.len().max(b.len());
    for i in 0..len {
        let left = a.get(i).copied().unwrap_or(0);
        let right = b.get(i).copied().unwrap_or(0);
        match left.cmp(&right) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_versions() {
        assert_eq!(compare_versions("1.0.11", "1.0.11"), Ordering::Equal);
        assert_eq!(compare_versions("1.0.10", "1.0.11"), Ordering::Less);
        assert_eq!(compare_versions("1.0.10.10", "1.0.11"), Ordering::Less);
        assert_eq!(compare_versions("1.0.12", "1.0.11"), Ordering::Greater);
        assert_eq!(compare_versions("1.1", "1.0.11"), Ordering::Greater);
        assert_eq!(compare_versions("1.0.11.0", "1.0.11"), Ordering::Equal);
    }

    #[test]
    fn test_supports_hash_signing() {
        assert!(supports_hash_signing("1.0.11"));
        assert!(supports_hash_signing("1.0.16"));
        assert!(!supports_hash_signing("1.0.8"));
    }
}
