//! Network data types: configuration, accounts and VM queries.

use serde::{Deserialize, Deserializer, Serialize};

use erd_primitives::{Address, Balance};
use erd_transaction::transaction::{
    DEFAULT_CHAIN_ID, DEFAULT_GAS_LIMIT, DEFAULT_GAS_PRICE, TRANSACTION_VERSION_DEFAULT,
};

/// Default gas charged per byte of transaction data.
pub const DEFAULT_GAS_PER_DATA_BYTE: u64 = 1_500;

/// Network parameters relevant to building transactions.
///
/// Deserializes from the `erd_*` keys of the proxy's `network/config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Chain identifier.
    #[serde(rename = "erd_chain_id")]
    pub chain_id: String,
    /// Gas charged per byte of data.
    #[serde(rename = "erd_gas_per_data_byte")]
    pub gas_per_data_byte: u64,
    /// Minimum gas limit of any transaction.
    #[serde(rename = "erd_min_gas_limit")]
    pub min_gas_limit: u64,
    /// Minimum gas price.
    #[serde(rename = "erd_min_gas_price")]
    pub min_gas_price: u64,
    /// Minimum transaction version.
    #[serde(rename = "erd_min_transaction_version")]
    pub min_transaction_version: u32,
    /// Gas price modifier for execution gas.
    #[serde(rename = "erd_gas_price_modifier", deserialize_with = "number_or_string")]
    pub gas_price_modifier: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            gas_per_data_byte: DEFAULT_GAS_PER_DATA_BYTE,
            min_gas_limit: DEFAULT_GAS_LIMIT,
            min_gas_price: DEFAULT_GAS_PRICE,
            min_transaction_version: TRANSACTION_VERSION_DEFAULT,
            gas_price_modifier: 1.0,
        }
    }
}

impl NetworkConfig {
    /// Minimum gas limit of a transfer carrying `data_len` bytes of data.
    pub fn gas_limit_for_payload(&self, data_len: usize) -> u64 {
        self.min_gas_limit
            .saturating_add(self.gas_per_data_byte.saturating_mul(data_len as u64))
    }
}

fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// An account as reported by the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountOnNetwork {
    /// Account address.
    pub address: Address,
    /// Next nonce to use.
    #[serde(default)]
    pub nonce: u64,
    /// Balance in smallest units.
    #[serde(default)]
    pub balance: Balance,
    /// Smart contract code, hex; empty for user accounts.
    #[serde(default)]
    pub code: String,
    /// Registered username, if any.
    #[serde(default)]
    pub username: String,
}

impl AccountOnNetwork {
    /// An account the network has never seen.
    pub fn empty(address: Address) -> Self {
        AccountOnNetwork {
            address,
            nonce: 0,
            balance: Balance::zero(),
            code: String::new(),
            username: String::new(),
        }
    }
}

/// A read-only smart contract call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VmQuery {
    /// Contract address.
    pub sc_address: Address,
    /// Function name.
    pub func_name: String,
    /// Hex-encoded arguments.
    pub args: Vec<String>,
}

impl VmQuery {
    /// Query `func_name` on `sc_address` without arguments.
    pub fn new(sc_address: Address, func_name: impl Into<String>) -> Self {
        VmQuery {
            sc_address,
            func_name: func_name.into(),
            args: Vec::new(),
        }
    }

    /// Append a raw argument.
    pub fn arg(mut self, bytes: &[u8]) -> Self {
        self.args.push(hex::encode(bytes));
        self
    }
}

/// Full output of a VM query.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmQueryResponse {
    /// Returned values, base64.
    #[serde(default, alias = "ReturnData")]
    pub return_data: Vec<String>,
    /// VM return code.
    #[serde(default, alias = "ReturnCode")]
    pub return_code: serde_json::Value,
    /// VM return message.
    #[serde(default, alias = "ReturnMessage")]
    pub return_message: String,
    /// Gas left after execution.
    #[serde(default, alias = "GasRemaining")]
    pub gas_remaining: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_config_defaults() {
        let config = NetworkConfig::default();
        assert_eq!(config.chain_id, "T");
        assert_eq!(config.gas_per_data_byte, 1_500);
        assert_eq!(config.min_gas_limit, 50_000);
        assert_eq!(config.min_gas_price, 1_000_000_000);
        assert_eq!(config.min_transaction_version, 1);
        assert_eq!(config.gas_limit_for_payload(10), 65_000);
    }

    #[test]
    fn test_network_config_from_proxy_keys() {
        let config: NetworkConfig = serde_json::from_value(serde_json::json!({
            "erd_chain_id": "D",
            "erd_gas_per_data_byte": 1500,
            "erd_min_gas_limit": 50000,
            "erd_min_gas_price": 1000000000,
            "erd_min_transaction_version": 1,
            "erd_gas_price_modifier": "0.01",
            "erd_denomination": 18
        }))
        .unwrap();
        assert_eq!(config.chain_id, "D");
        assert!((config.gas_price_modifier - 0.01).abs() < f64::EPSILON);

        let partial: NetworkConfig =
            serde_json::from_value(serde_json::json!({ "erd_chain_id": "1" })).unwrap();
        assert_eq!(partial.chain_id, "1");
        assert_eq!(partial.min_gas_limit, 50_000);
    }

    #[test]
    fn test_account_from_proxy_json() {
        let account: AccountOnNetwork = serde_json::from_value(serde_json::json!({
            "address": "erd1qyu5wthldzr8wx5c9ucg8kjagg0jfs53s8nr3zpz3hypefsdd8ssycr6th",
            "nonce": 42,
            "balance": "1000000000000000000",
            "code": "",
            "codeHash": null,
            "rootHash": "abc"
        }))
        .unwrap();
        assert_eq!(account.nonce, 42);
        assert_eq!(account.balance.to_currency_string(), "1 eGLD");
    }

    #[test]
    fn test_vm_query_shape() {
        let address = Address::from_bech32(
            "erd1qyu5wthldzr8wx5c9ucg8kjagg0jfs53s8nr3zpz3hypefsdd8ssycr6th",
        )
        .unwrap();
        let query = VmQuery::new(address, "getSum").arg(&[1, 2]);
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "scAddress": "erd1qyu5wthldzr8wx5c9ucg8kjagg0jfs53s8nr3zpz3hypefsdd8ssycr6th",
                "funcName": "getSum",
                "args": ["0102"]
            })
        );
    }
}
