//! Transaction hashes and statuses as reported by the network.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hash of a submitted transaction, as returned by the network.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionHash(String);

impl TransactionHash {
    /// Wrap a hash string.
    pub fn new(hash: impl Into<String>) -> Self {
        TransactionHash(hash.into())
    }

    /// The hash as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status of a transaction, as reported by the network.
///
/// The network reports free-form strings; the predicates group the known
/// values. Statuses are stored lowercased.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TransactionStatus(String);

impl TransactionStatus {
    /// Create a status from a network string. The value is lowercased.
    pub fn new(status: impl Into<String>) -> Self {
        TransactionStatus(status.into().to_lowercase())
    }

    /// The `pending` status.
    pub fn pending() -> Self {
        Self::new("pending")
    }

    /// The `executed` status.
    pub fn executed() -> Self {
        Self::new("executed")
    }

    /// The `invalid` status.
    pub fn invalid() -> Self {
        Self::new("invalid")
    }

    /// The status string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Received but not yet (fully) executed.
    pub fn is_pending(&self) -> bool {
        matches!(self.as_str(), "received" | "pending" | "partially-executed")
    }

    /// Executed, successfully or not.
    pub fn is_executed(&self) -> bool {
        matches!(self.as_str(), "executed" | "success" | "successful") || self.is_invalid()
    }

    /// Executed successfully.
    pub fn is_successful(&self) -> bool {
        matches!(self.as_str(), "executed" | "success" | "successful")
    }

    /// Failed during execution or rejected.
    pub fn is_failed(&self) -> bool {
        matches!(self.as_str(), "fail" | "failed" | "unsuccessful" | "invalid")
    }

    /// Rejected as invalid.
    pub fn is_invalid(&self) -> bool {
        self.as_str() == "invalid"
    }
}

impl From<String> for TransactionStatus {
    fn from(status: String) -> Self {
        TransactionStatus::new(status)
    }
}

impl From<TransactionStatus> for String {
    fn from(status: TransactionStatus) -> Self {
        status.0
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
