//! Proxy data types: configuration and response envelopes.

use std::time::Duration;

use serde::Deserialize;

use erd_network::{AccountOnNetwork, NetworkConfig};
use erd_primitives::Balance;
use erd_transaction::{TransactionHash, TransactionStatus};

/// Public mainnet gateway.
pub const MAINNET_GATEWAY: &str = "https://gateway.elrond.com";

/// Public devnet gateway.
pub const DEVNET_GATEWAY: &str = "https://devnet-gateway.elrond.com";

/// Public testnet gateway.
pub const TESTNET_GATEWAY: &str = "https://testnet-gateway.elrond.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Configuration for a [`ProxyProvider`](crate::ProxyProvider).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Base URL of the proxy, without a trailing route.
    pub base_url: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            base_url: TESTNET_GATEWAY.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ProxyConfig {
    /// Target `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Fields common to every proxy response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResponseBase {
    /// Error message; empty on success.
    #[serde(default)]
    pub error: String,
    /// Result code, e.g. `"successful"`.
    #[serde(default)]
    pub code: String,
}

/// The `{data, error, code}` envelope wrapping every proxy response.
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyResponse<T> {
    /// Payload; absent or null on failure.
    pub data: Option<T>,
    /// Error and code.
    #[serde(flatten)]
    pub base: ResponseBase,
}

/// Payload of `GET address/:address`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountData {
    /// The account.
    pub account: AccountOnNetwork,
}

/// Payload of `GET address/:address/balance`.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceData {
    /// The balance.
    pub balance: Balance,
}

/// Payload of `GET address/:address/nonce`.
#[derive(Debug, Clone, Deserialize)]
pub struct NonceData {
    /// The next nonce.
    pub nonce: u64,
}

/// Payload of `POST transaction/send`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendData {
    /// Hash of the accepted transaction.
    pub tx_hash: TransactionHash,
}

/// Payload of `POST vm-values/*`.
#[derive(Debug, Clone, Deserialize)]
pub struct VmValueData<T> {
    /// The decoded value.
    pub data: T,
}

/// Payload of `GET transaction/:hash/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusData {
    /// The status.
    pub status: TransactionStatus,
}

/// Payload of `GET network/config`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigData {
    /// The network parameters.
    pub config: NetworkConfig,
}
