//! Signed messages.
//!
//! The signed payload is the Keccak-256 hash of a fixed prefix followed by
//! the message bytes, so a message signature can never double as a
//! transaction signature.

use serde::{Deserialize, Serialize};

use erd_primitives::hash::keccak256;
use erd_primitives::{Address, Signable, Signature};

use crate::MessageError;

/// Prefix prepended to every message before hashing.
pub const MESSAGE_PREFIX: &[u8] = b"\x17Elrond Signed Message:\n";

/// Current message format version.
pub const MESSAGE_VERSION: u32 = 1;

/// Signer kind recorded when none is given.
pub const DEFAULT_MESSAGE_SIGNER: &str = "Wallet";

/// An arbitrary message signed by an account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    value: Vec<u8>,
    address: Option<Address>,
    signature: Signature,
    version: u32,
    signer: String,
}

/// Hex-encoded form of a message, for transport.
///
/// The address is the zero address while unsigned. The signature is
/// omitted while empty and the version is omitted while it is 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainMessage {
    /// Signer address, hex. Bech32 is accepted when parsing.
    pub address: String,
    /// Message bytes, hex.
    pub value: String,
    /// Signature, hex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Format version, when above 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    /// Kind of signer that produced the signature.
    #[serde(default = "default_signer")]
    pub signer: String,
}

fn default_signer() -> String {
    DEFAULT_MESSAGE_SIGNER.to_string()
}

impl Message {
    /// Wrap message bytes; unsigned, no address.
    pub fn new(value: impl Into<Vec<u8>>) -> Self {
        Message {
            value: value.into(),
            address: None,
            signature: Signature::empty(),
            version: MESSAGE_VERSION,
            signer: default_signer(),
        }
    }

    /// The bytes that are actually signed.
    pub fn hash(&self) -> [u8; 32] {
        let mut prefixed = Vec::with_capacity(MESSAGE_PREFIX.len() + self.value.len());
        prefixed.extend_from_slice(MESSAGE_PREFIX);
        prefixed.extend_from_slice(&self.value);
        keccak256(&prefixed)
    }

    /// The message bytes.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// The signer address, once signed.
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// The signature; empty until signed.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Format version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Kind of signer, `"Wallet"` unless set.
    pub fn signer(&self) -> &str {
        &self.signer
    }

    /// Record the kind of signer, e.g. a hardware device.
    pub fn with_signer(mut self, signer: impl Into<String>) -> Self {
        self.signer = signer.into();
        self
    }

    /// Attach a signature and its claimed signer, e.g. when received.
    pub fn with_signature(mut self, signature: Signature, address: Address) -> Self {
        self.signature = signature;
        self.address = Some(address);
        self
    }

    /// Hex-encoded form.
    pub fn to_plain(&self) -> PlainMessage {
        PlainMessage {
            address: self.address.unwrap_or_else(Address::zero).to_hex(),
            value: hex::encode(&self.value),
            signature: (!self.signature.is_empty()).then(|| self.signature.to_hex()),
            version: (self.version > MESSAGE_VERSION).then_some(self.version),
            signer: self.signer.clone(),
        }
    }

    /// Rebuild a message from its hex-encoded form.
    ///
    /// A zero address means unsigned. A missing version is 1.
    pub fn from_plain(plain: &PlainMessage) -> Result<Self, MessageError> {
        let value = hex::decode(&plain.value)
            .map_err(|e| MessageError::InvalidPlainMessage(format!("value: {e}")))?;
        let signature = match plain.signature.as_deref() {
            Some(sig) if !sig.is_empty() => Signature::from_hex(sig)?,
            _ => Signature::empty(),
        };
        let address = Address::from_string(&plain.address)?;
        let signer = if plain.signer.is_empty() {
            default_signer()
        } else {
            plain.signer.clone()
        };
        Ok(Message {
            value,
            address: (!address.is_zero()).then_some(address),
            signature,
            version: plain.version.unwrap_or(MESSAGE_VERSION),
            signer,
        })
    }
}

impl Signable for Message {
    type Error = MessageError;

    fn serialize_for_signing(&self, _signed_by: &Address) -> Result<Vec<u8>, Self::Error> {
        Ok(self.hash().to_vec())
    }

    fn apply_signature(&mut self, signature: Signature, signed_by: &Address) {
        self.signature = signature;
        self.address = Some(*signed_by);
    }
}
