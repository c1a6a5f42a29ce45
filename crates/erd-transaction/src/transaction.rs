//! Transactions and their canonical signing form.
//!
//! The signing payload is compact JSON with a fixed key order:
//! `nonce, value, receiver, sender, gasPrice, gasLimit, data, chainID,
//! version, options`. Zero gas price, zero gas limit, empty data and zero
//! options are omitted. Any change to this form breaks signature
//! verification by the network.

use serde::{Deserialize, Serialize};

use erd_primitives::hash::keccak256;
use erd_primitives::{Address, Balance, Signable, Signature};

use crate::payload::TransactionPayload;
use crate::TransactionError;

/// Default protocol version.
pub const TRANSACTION_VERSION_DEFAULT: u32 = 1;

/// Minimum version for transactions signed by hash.
pub const TRANSACTION_VERSION_TX_HASH_SIGN: u32 = 2;

/// Option bit marking a transaction signed by hash.
pub const TRANSACTION_OPTIONS_TX_HASH_SIGN: u32 = 1;

/// Default gas price, in smallest units per gas unit.
pub const DEFAULT_GAS_PRICE: u64 = 1_000_000_000;

/// Default gas limit of a plain transfer.
pub const DEFAULT_GAS_LIMIT: u64 = 50_000;

/// Default chain identifier (testnet).
pub const DEFAULT_CHAIN_ID: &str = "T";

/// A transaction on the network.
///
/// Fields are freely mutable until the transaction is signed. Mutating a
/// signed transaction invalidates its signature; this is not guarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Sender account nonce.
    pub nonce: u64,
    /// Amount transferred to the receiver.
    pub value: Balance,
    /// Receiver address.
    pub receiver: Address,
    /// Sender address.
    pub sender: Address,
    /// Price per gas unit.
    pub gas_price: u64,
    /// Maximum gas units to consume.
    pub gas_limit: u64,
    /// Opaque data payload.
    pub data: TransactionPayload,
    /// Chain identifier.
    pub chain_id: String,
    /// Protocol version.
    pub version: u32,
    /// Option bits.
    pub options: u32,
    /// Signature; empty until signed.
    signature: Signature,
}

/// The JSON shape of a transaction, as signed and as sent to the network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlainTransaction {
    /// Sender account nonce.
    pub nonce: u64,
    /// Decimal amount.
    pub value: String,
    /// Receiver bech32 address.
    pub receiver: String,
    /// Sender bech32 address.
    pub sender: String,
    /// Price per gas unit; omitted when zero.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub gas_price: u64,
    /// Gas limit; omitted when zero.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub gas_limit: u64,
    /// Base64 data; omitted when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data: String,
    /// Chain identifier.
    #[serde(rename = "chainID")]
    pub chain_id: String,
    /// Protocol version.
    pub version: u32,
    /// Option bits; omitted when zero.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub options: u32,
    /// Hex signature; present only in sendable transactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

impl Transaction {
    /// Create an unsigned transfer of zero value with default gas settings.
    ///
    /// # Arguments
    /// * `sender` - The account paying for the transaction.
    /// * `receiver` - The destination account.
    ///
    /// # Returns
    /// A `Transaction` with nonce 0, default gas price and limit, empty
    /// data, the default chain id and version 1.
    pub fn new(sender: Address, receiver: Address) -> Self {
        Transaction {
            nonce: 0,
            value: Balance::zero(),
            receiver,
            sender,
            gas_price: DEFAULT_GAS_PRICE,
            gas_limit: DEFAULT_GAS_LIMIT,
            data: TransactionPayload::empty(),
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            version: TRANSACTION_VERSION_DEFAULT,
            options: 0,
            signature: Signature::empty(),
        }
    }

    /// The signature, empty if unsigned.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Whether a signature has been applied.
    pub fn is_signed(&self) -> bool {
        !self.signature.is_empty()
    }

    /// Whether the option bit for signing by hash is set.
    pub fn is_hash_signed(&self) -> bool {
        self.options & TRANSACTION_OPTIONS_TX_HASH_SIGN != 0
    }

    /// Convert to the JSON shape, with or without the signature.
    pub fn to_plain(&self, with_signature: bool) -> PlainTransaction {
        let signature = (with_signature && self.is_signed()).then(|| self.signature.to_hex());
        PlainTransaction {
            nonce: self.nonce,
            value: self.value.to_string(),
            receiver: self.receiver.to_bech32(),
            sender: self.sender.to_bech32(),
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            data: if self.data.is_empty() {
                String::new()
            } else {
                self.data.encoded()
            },
            chain_id: self.chain_id.clone(),
            version: self.version,
            options: self.options,
            signature,
        }
    }

    /// Rebuild a transaction from its JSON shape.
    ///
    /// # Arguments
    /// * `plain` - A plain transaction, signed or not.
    ///
    /// # Returns
    /// The transaction, or an error if an address, the value, the data or
    /// the signature is malformed.
    pub fn from_plain(plain: &PlainTransaction) -> Result<Self, TransactionError> {
        let value: Balance = plain.value.parse()?;
        let signature = match plain.signature.as_deref() {
            Some(sig) if !sig.is_empty() => Signature::from_hex(sig)?,
            _ => Signature::empty(),
        };
        Ok(Transaction {
            nonce: plain.nonce,
            value,
            receiver: Address::from_bech32(&plain.receiver)?,
            sender: Address::from_bech32(&plain.sender)?,
            gas_price: plain.gas_price,
            gas_limit: plain.gas_limit,
            data: TransactionPayload::from_encoded(&plain.data)?,
            chain_id: plain.chain_id.clone(),
            version: plain.version,
            options: plain.options,
            signature,
        })
    }

    /// The canonical JSON bytes, without signature.
    pub fn canonical_json(&self) -> Result<Vec<u8>, TransactionError> {
        Ok(serde_json::to_vec(&self.to_plain(false))?)
    }

    /// The exact bytes a signer signs.
    ///
    /// This is the canonical JSON, or its Keccak-256 hash when the
    /// transaction is marked for signing by hash.
    pub fn serialize_for_signing(&self) -> Result<Vec<u8>, TransactionError> {
        let json = self.canonical_json()?;
        if self.is_hash_signed() {
            return Ok(keccak256(&json).to_vec());
        }
        Ok(json)
    }

    /// Record a signature. The transaction should not be mutated afterwards.
    pub fn apply_signature(&mut self, signature: Signature) {
        self.signature = signature;
    }

    /// The JSON shape submitted to the network, including the signature.
    ///
    /// # Returns
    /// The sendable transaction, or `NotSigned` if no signature was applied.
    pub fn get_as_sendable(&self) -> Result<PlainTransaction, TransactionError> {
        if !self.is_signed() {
            return Err(TransactionError::NotSigned);
        }
        Ok(self.to_plain(true))
    }
}

impl Signable for Transaction {
    type Error = TransactionError;

    fn serialize_for_signing(&self, _signed_by: &Address) -> Result<Vec<u8>, Self::Error> {
        Transaction::serialize_for_signing(self)
    }

    fn apply_signature(&mut self, signature: Signature, _signed_by: &Address) {
        Transaction::apply_signature(self, signature);
    }

    fn enable_hash_signing(&mut self) -> bool {
        self.version = self.version.max(TRANSACTION_VERSION_TX_HASH_SIGN);
        self.options |= TRANSACTION_OPTIONS_TX_HASH_SIGN;
        true
    }
}
