//! Account addresses.
//!
//! An address is the 32-byte Ed25519 public key of an account. Its textual
//! form is bech32 (not bech32m) with the `erd` human-readable prefix.

use std::fmt;
use std::str::FromStr;

use bech32::{FromBase32, ToBase32, Variant};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PrimitivesError;

/// Human-readable prefix of every bech32 address.
pub const HRP: &str = "erd";

/// Length of an address payload in bytes.
pub const ADDRESS_LEN: usize = 32;

/// A 32-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    bytes: [u8; ADDRESS_LEN],
}

impl Address {
    /// Create an address from its raw 32 bytes.
    ///
    /// # Arguments
    /// * `bytes` - The public key bytes; must be exactly 32 bytes long.
    ///
    /// # Returns
    /// `Ok(Address)` or `InvalidAddress` if the length is wrong.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let bytes: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|_| {
            PrimitivesError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                ADDRESS_LEN,
                bytes.len()
            ))
        })?;
        Ok(Address { bytes })
    }

    /// Create an address from a 64-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| PrimitivesError::InvalidAddress(format!("bad hex: {e}")))?;
        Self::from_bytes(&bytes)
    }

    /// Decode a bech32 address.
    ///
    /// Validates the checksum (bech32 variant only), the `erd` prefix and the
    /// 32-byte payload length.
    ///
    /// # Arguments
    /// * `text` - The bech32 string, e.g. `erd1qyu5...`.
    ///
    /// # Returns
    /// `Ok(Address)` or `InvalidAddress` describing the first failed check.
    pub fn from_bech32(text: &str) -> Result<Self, PrimitivesError> {
        let (hrp, data, variant) = bech32::decode(text)
            .map_err(|e| PrimitivesError::InvalidAddress(format!("{text}: {e}")))?;

        if variant != Variant::Bech32 {
            return Err(PrimitivesError::InvalidAddress(format!(
                "{text}: bech32m encoding is not accepted"
            )));
        }
        if hrp != HRP {
            return Err(PrimitivesError::InvalidAddress(format!(
                "{text}: wrong prefix {hrp}, expected {HRP}"
            )));
        }

        let payload = Vec::<u8>::from_base32(&data)
            .map_err(|e| PrimitivesError::InvalidAddress(format!("{text}: {e}")))?;
        Self::from_bytes(&payload)
    }

    /// Parse either a bech32 address or a 64-character hex string.
    pub fn from_string(value: &str) -> Result<Self, PrimitivesError> {
        let value = value.trim();
        if value.len() == ADDRESS_LEN * 2 && value.chars().all(|c| c.is_ascii_hexdigit()) {
            return Self::from_hex(value);
        }
        Self::from_bech32(value)
    }

    /// The all-zero address.
    pub fn zero() -> Self {
        Address {
            bytes: [0u8; ADDRESS_LEN],
        }
    }

    /// Whether this is the all-zero address.
    pub fn is_zero(&self) -> bool {
        self.bytes.iter().all(|b| *b == 0)
    }

    /// Encode as bech32 with the `erd` prefix.
    pub fn to_bech32(&self) -> String {
        bech32::encode(HRP, self.bytes.to_base32(), Variant::Bech32)
            .expect("erd is a valid human-readable prefix")
    }

    /// Lowercase hex of the 32 address bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// The raw 32 address bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.bytes
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bech32())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_bech32())
    }
}

impl FromStr for Address {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bech32(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_bech32())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Address::from_bech32(&text).map_err(serde::de::Error::custom)
    }
}
