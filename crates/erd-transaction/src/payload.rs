//! Transaction data payloads.
//!
//! The payload is opaque bytes. Smart contract calls use the
//! `function@arg1@arg2` convention, where each argument is hex encoded.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use num_bigint::BigUint;
use num_traits::Zero;

use erd_primitives::Address;

use crate::TransactionError;

/// Separator between the function name and its arguments.
pub const ARGUMENTS_SEPARATOR: char = '@';

/// The data field of a transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionPayload {
    data: Vec<u8>,
}

impl TransactionPayload {
    /// Create a payload from raw bytes.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        TransactionPayload { data: data.into() }
    }

    /// The empty payload.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode a base64 payload, as found in sendable transactions.
    ///
    /// # Arguments
    /// * `encoded` - Standard base64 text.
    ///
    /// # Returns
    /// The payload, or `InvalidPayload` if the text is not base64.
    pub fn from_encoded(encoded: &str) -> Result<Self, TransactionError> {
        let data = STANDARD
            .decode(encoded)
            .map_err(|e| TransactionError::InvalidPayload(e.to_string()))?;
        Ok(TransactionPayload { data })
    }

    /// Start a smart contract call payload for `function`.
    pub fn contract_call(function: &str) -> ContractCallBuilder {
        ContractCallBuilder {
            function: function.to_string(),
            args: Vec::new(),
        }
    }

    /// Split a contract call payload into its function name and raw arguments.
    ///
    /// # Returns
    /// `(function, args)`, or `InvalidPayload` if the payload is not UTF-8,
    /// has no function name, or holds an argument that is not hex.
    pub fn parse_contract_call(&self) -> Result<(String, Vec<Vec<u8>>), TransactionError> {
        let text = std::str::from_utf8(&self.data)
            .map_err(|e| TransactionError::InvalidPayload(e.to_string()))?;
        let mut parts = text.split(ARGUMENTS_SEPARATOR);
        let function = parts.next().unwrap_or_default();
        if function.is_empty() {
            return Err(TransactionError::InvalidPayload(
                "missing function name".to_string(),
            ));
        }

        let args = parts
            .map(|arg| {
                hex::decode(arg).map_err(|e| {
                    TransactionError::InvalidPayload(format!("argument {arg:?}: {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok((function.to_string(), args))
    }

    /// Base64 encoding of the payload.
    pub fn encoded(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// The raw payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl From<&str> for TransactionPayload {
    fn from(data: &str) -> Self {
        Self::new(data.as_bytes())
    }
}

impl From<String> for TransactionPayload {
    fn from(data: String) -> Self {
        Self::new(data.into_bytes())
    }
}

impl fmt::Display for TransactionPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.data))
    }
}

/// Builder for `function@arg...` payloads.
#[derive(Clone, Debug)]
pub struct ContractCallBuilder {
    function: String,
    args: Vec<String>,
}

impl ContractCallBuilder {
    /// Append raw bytes.
    pub fn arg_bytes(mut self, bytes: &[u8]) -> Self {
        self.args.push(hex::encode(bytes));
        self
    }

    /// Append an unsigned integer as minimal big-endian bytes; zero is empty.
    pub fn arg_biguint(self, value: &BigUint) -> Self {
        if value.is_zero() {
            return self.arg_bytes(&[]);
        }
        let bytes = value.to_bytes_be();
        self.arg_bytes(&bytes)
    }

    /// Append an unsigned integer as minimal big-endian bytes; zero is empty.
    pub fn arg_u64(self, value: u64) -> Self {
        self.arg_biguint(&BigUint::from(value))
    }

    /// Append the 32 bytes of an address.
    pub fn arg_address(self, address: &Address) -> Self {
        self.arg_bytes(address.as_bytes())
    }

    /// Append UTF-8 text.
    pub fn arg_str(self, text: &str) -> Self {
        self.arg_bytes(text.as_bytes())
    }

    /// Finish the payload.
    pub fn build(self) -> TransactionPayload {
        let mut text = self.function;
        for arg in self.args {
            text.push(ARGUMENTS_SEPARATOR);
            text.push_str(&arg);
        }
        TransactionPayload::from(text)
    }
}
