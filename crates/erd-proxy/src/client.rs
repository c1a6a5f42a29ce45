//! HTTP client for the proxy API.

use num_bigint::BigInt;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use erd_network::{
    AccountOnNetwork, HttpMethod, NetworkConfig, Provider, ProviderError, VmQuery,
    VmQueryResponse,
};
use erd_primitives::{Address, Balance};
use erd_transaction::{Transaction, TransactionHash, TransactionStatus};

use crate::types::{
    AccountData, BalanceData, ConfigData, NonceData, ProxyConfig, ProxyResponse, SendData,
    StatusData, VmValueData,
};

/// [`Provider`] backed by the proxy's HTTP API.
#[derive(Debug, Clone)]
pub struct ProxyProvider {
    /// Client configuration.
    config: ProxyConfig,
    /// Underlying HTTP client.
    client: reqwest::Client,
}

impl ProxyProvider {
    /// Create a new proxy provider with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    /// The client configuration.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    fn url(&self, route: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), route)
    }

    async fn get<T: DeserializeOwned>(&self, route: &str) -> Result<T, ProviderError> {
        let url = self.url(route);
        let request = self.client.get(&url).timeout(self.config.timeout);
        self.execute(HttpMethod::Get, url, request).await
    }

    async fn post<B, T>(&self, route: &str, body: &B) -> Result<T, ProviderError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(route);
        let request = self
            .client
            .post(&url)
            .timeout(self.config.timeout)
            .json(body);
        self.execute(HttpMethod::Post, url, request).await
    }

    /// Send a request and unwrap the `{data, error, code}` envelope.
    async fn execute<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        url: String,
        request: RequestBuilder,
    ) -> Result<T, ProviderError> {
        debug!(%method, %url, "proxy request");

        let resp = request
            .send()
            .await
            .map_err(|e| transport_error(method, &url, e))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| transport_error(method, &url, e))?;

        let envelope: ProxyResponse<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(ProviderError::UnexpectedResponse {
                    url,
                    message: e.to_string(),
                })
            }
            Err(_) => return Err(request_failed(method, url, format!("HTTP {status}"))),
        };

        if !envelope.base.error.is_empty() {
            return Err(request_failed(method, url, envelope.base.error));
        }
        if !status.is_success() {
            return Err(request_failed(method, url, format!("HTTP {status}")));
        }

        envelope.data.ok_or_else(|| ProviderError::UnexpectedResponse {
            url,
            message: "response carries no data".to_string(),
        })
    }
}

fn request_failed(method: HttpMethod, url: String, message: String) -> ProviderError {
    ProviderError::RequestFailed {
        method,
        url,
        message,
        source: None,
    }
}

fn transport_error(method: HttpMethod, url: &str, e: reqwest::Error) -> ProviderError {
    ProviderError::RequestFailed {
        method,
        url: url.to_string(),
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}

impl Provider for ProxyProvider {
    async fn get_account(&self, address: &Address) -> Result<AccountOnNetwork, ProviderError> {
        let data: AccountData = self.get(&format!("address/{address}")).await?;
        Ok(data.account)
    }

    async fn get_balance(&self, address: &Address) -> Result<Balance, ProviderError> {
        let data: BalanceData = self.get(&format!("address/{address}/balance")).await?;
        Ok(data.balance)
    }

    async fn get_nonce(&self, address: &Address) -> Result<u64, ProviderError> {
        let data: NonceData = self.get(&format!("address/{address}/nonce")).await?;
        Ok(data.nonce)
    }

    async fn get_vm_value_string(&self, query: &VmQuery) -> Result<String, ProviderError> {
        let data: VmValueData<String> = self.post("vm-values/string", query).await?;
        Ok(data.data)
    }

    async fn get_vm_value_int(&self, query: &VmQuery) -> Result<BigInt, ProviderError> {
        let data: VmValueData<String> = self.post("vm-values/int", query).await?;
        data.data
            .parse()
            .map_err(|e| ProviderError::UnexpectedResponse {
                url: self.url("vm-values/int"),
                message: format!("invalid integer {:?}: {e}", data.data),
            })
    }

    async fn get_vm_value_hex(&self, query: &VmQuery) -> Result<String, ProviderError> {
        let data: VmValueData<String> = self.post("vm-values/hex", query).await?;
        Ok(data.data)
    }

    async fn query_vm(&self, query: &VmQuery) -> Result<VmQueryResponse, ProviderError> {
        let data: VmValueData<VmQueryResponse> = self.post("vm-values/query", query).await?;
        Ok(data.data)
    }

    async fn send_transaction(&self, tx: &Transaction) -> Result<TransactionHash, ProviderError> {
        let sendable = tx.get_as_sendable().map_err(|e| ProviderError::RequestFailed {
            method: HttpMethod::Post,
            url: self.url("transaction/send"),
            message: e.to_string(),
            source: Some(Box::new(e)),
        })?;
        let data: SendData = self.post("transaction/send", &sendable).await?;
        info!(hash = %data.tx_hash, sender = %tx.sender, nonce = tx.nonce, "transaction sent");
        Ok(data.tx_hash)
    }

    async fn get_transaction_status(
        &self,
        hash: &TransactionHash,
    ) -> Result<TransactionStatus, ProviderError> {
        let data: StatusData = self.get(&format!("transaction/{hash}/status")).await?;
        Ok(data.status)
    }

    async fn get_network_config(&self) -> Result<NetworkConfig, ProviderError> {
        let data: ConfigData = self.get("network/config").await?;
        Ok(data.config)
    }
}
