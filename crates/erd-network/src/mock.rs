//! In-memory provider for tests and offline development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use num_bigint::BigInt;

use erd_primitives::hash::sha256;
use erd_primitives::{Address, Balance};
use erd_transaction::{Transaction, TransactionHash, TransactionStatus};

use crate::error::ProviderError;
use crate::provider::Provider;
use crate::types::{AccountOnNetwork, NetworkConfig, VmQuery, VmQueryResponse};

/// One step of a scripted status timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelinePoint {
    /// Set the transaction's status.
    Status(TransactionStatus),
    /// Let time pass.
    Wait(Duration),
}

/// A provider backed by in-memory maps.
///
/// Sent transactions get the hex SHA-256 of their sendable JSON as hash,
/// start `pending`, and advance the sender's nonce.
#[derive(Debug, Default)]
pub struct MockProvider {
    accounts: Mutex<HashMap<Address, AccountOnNetwork>>,
    statuses: Mutex<HashMap<TransactionHash, TransactionStatus>>,
    vm_values: Mutex<HashMap<String, Vec<Vec<u8>>>>,
    sent: Mutex<Vec<Transaction>>,
    network_config: NetworkConfig,
    status_queries: AtomicUsize,
}

impl MockProvider {
    /// An empty provider with the default network config.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty provider reporting `config`.
    pub fn with_network_config(config: NetworkConfig) -> Self {
        MockProvider {
            network_config: config,
            ..Self::default()
        }
    }

    /// Set or replace an account.
    pub fn mock_set_account(&self, account: AccountOnNetwork) {
        lock(&self.accounts).insert(account.address, account);
    }

    /// Apply `update` to an account, creating it empty if unknown.
    pub fn mock_update_account(&self, address: &Address, update: impl FnOnce(&mut AccountOnNetwork)) {
        let mut accounts = lock(&self.accounts);
        let account = accounts
            .entry(*address)
            .or_insert_with(|| AccountOnNetwork::empty(*address));
        update(account);
    }

    /// Set the status of a transaction.
    pub fn mock_set_status(&self, hash: &TransactionHash, status: TransactionStatus) {
        lock(&self.statuses).insert(hash.clone(), status);
    }

    /// Register the raw return values of a VM function.
    pub fn mock_set_vm_value(&self, func_name: impl Into<String>, return_data: Vec<Vec<u8>>) {
        lock(&self.vm_values).insert(func_name.into(), return_data);
    }

    /// Play a status timeline for `hash`, sleeping on `Wait` points.
    pub async fn mock_transaction_timeline(&self, hash: &TransactionHash, points: Vec<TimelinePoint>) {
        for point in points {
            match point {
                TimelinePoint::Status(status) => self.mock_set_status(hash, status),
                TimelinePoint::Wait(duration) => tokio::time::sleep(duration).await,
            }
        }
    }

    /// Number of status requests served so far.
    pub fn status_queries(&self) -> usize {
        self.status_queries.load(Ordering::SeqCst)
    }

    /// Transactions accepted so far, in order.
    pub fn sent_transactions(&self) -> Vec<Transaction> {
        lock(&self.sent).clone()
    }

    fn return_data(&self, query: &VmQuery) -> Result<Vec<Vec<u8>>, ProviderError> {
        lock(&self.vm_values)
            .get(&query.func_name)
            .cloned()
            .ok_or_else(|| ProviderError::Mock(format!("no VM value for {}", query.func_name)))
    }

    fn first_return_value(&self, query: &VmQuery) -> Result<Vec<u8>, ProviderError> {
        Ok(self.return_data(query)?.into_iter().next().unwrap_or_default())
    }

    fn account(&self, address: &Address) -> AccountOnNetwork {
        lock(&self.accounts)
            .get(address)
            .cloned()
            .unwrap_or_else(|| AccountOnNetwork::empty(*address))
    }
}

impl Provider for MockProvider {
    async fn get_account(&self, address: &Address) -> Result<AccountOnNetwork, ProviderError> {
        Ok(self.account(address))
    }

    async fn get_balance(&self, address: &Address) -> Result<Balance, ProviderError> {
        Ok(self.account(address).balance)
    }

    async fn get_nonce(&self, address: &Address) -> Result<u64, ProviderError> {
        Ok(self.account(address).nonce)
    }

    async fn get_vm_value_string(&self, query: &VmQuery) -> Result<String, ProviderError> {
        let value = self.first_return_value(query)?;
        String::from_utf8(value).map_err(|e| ProviderError::Mock(e.to_string()))
    }

    async fn get_vm_value_int(&self, query: &VmQuery) -> Result<BigInt, ProviderError> {
        Ok(BigInt::from_signed_bytes_be(&self.first_return_value(query)?))
    }

    async fn get_vm_value_hex(&self, query: &VmQuery) -> Result<String, ProviderError> {
        Ok(hex::encode(self.first_return_value(query)?))
    }

    async fn query_vm(&self, query: &VmQuery) -> Result<VmQueryResponse, ProviderError> {
        let return_data = self.return_data(query)?;
        Ok(VmQueryResponse {
            return_data: return_data.iter().map(|value| STANDARD.encode(value)).collect(),
            return_code: serde_json::Value::String("ok".to_string()),
            ..VmQueryResponse::default()
        })
    }

    async fn send_transaction(&self, tx: &Transaction) -> Result<TransactionHash, ProviderError> {
        let sendable = tx
            .get_as_sendable()
            .map_err(|e| ProviderError::Mock(e.to_string()))?;
        let body = serde_json::to_vec(&sendable).map_err(|e| ProviderError::Mock(e.to_string()))?;
        let hash = TransactionHash::new(hex::encode(sha256(&body)));

        self.mock_update_account(&tx.sender, |account| account.nonce = tx.nonce + 1);
        self.mock_set_status(&hash, TransactionStatus::pending());
        lock(&self.sent).push(tx.clone());
        tracing::debug!(%hash, nonce = tx.nonce, "mock provider accepted transaction");
        Ok(hash)
    }

    async fn get_transaction_status(
        &self,
        hash: &TransactionHash,
    ) -> Result<TransactionStatus, ProviderError> {
        self.status_queries.fetch_add(1, Ordering::SeqCst);
        lock(&self.statuses)
            .get(hash)
            .cloned()
            .ok_or_else(|| ProviderError::Mock(format!("unknown transaction {hash}")))
    }

    async fn get_network_config(&self) -> Result<NetworkConfig, ProviderError> {
        Ok(self.network_config.clone())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
