//! The network provider contract.

use std::future::Future;

use num_bigint::BigInt;

use erd_primitives::{Address, Balance};
use erd_transaction::{Transaction, TransactionHash, TransactionStatus};

use crate::error::ProviderError;
use crate::types::{AccountOnNetwork, NetworkConfig, VmQuery, VmQueryResponse};

/// Read and write access to the network.
///
/// Implemented by the HTTP proxy client and, behind the `mock` feature,
/// by an in-memory provider for tests.
pub trait Provider {
    /// Fetch an account's nonce, balance and code.
    fn get_account(
        &self,
        address: &Address,
    ) -> impl Future<Output = Result<AccountOnNetwork, ProviderError>> + Send;

    /// Fetch an account's balance.
    fn get_balance(
        &self,
        address: &Address,
    ) -> impl Future<Output = Result<Balance, ProviderError>> + Send;

    /// Fetch an account's next nonce.
    fn get_nonce(
        &self,
        address: &Address,
    ) -> impl Future<Output = Result<u64, ProviderError>> + Send;

    /// Run a VM query whose result is decoded as text.
    fn get_vm_value_string(
        &self,
        query: &VmQuery,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send;

    /// Run a VM query whose result is decoded as a signed integer.
    fn get_vm_value_int(
        &self,
        query: &VmQuery,
    ) -> impl Future<Output = Result<BigInt, ProviderError>> + Send;

    /// Run a VM query whose result is returned as hex.
    fn get_vm_value_hex(
        &self,
        query: &VmQuery,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send;

    /// Run a VM query and return its full output.
    fn query_vm(
        &self,
        query: &VmQuery,
    ) -> impl Future<Output = Result<VmQueryResponse, ProviderError>> + Send;

    /// Submit a signed transaction.
    fn send_transaction(
        &self,
        tx: &Transaction,
    ) -> impl Future<Output = Result<TransactionHash, ProviderError>> + Send;

    /// Fetch the current status of a submitted transaction.
    fn get_transaction_status(
        &self,
        hash: &TransactionHash,
    ) -> impl Future<Output = Result<TransactionStatus, ProviderError>> + Send;

    /// Fetch the network parameters.
    fn get_network_config(
        &self,
    ) -> impl Future<Output = Result<NetworkConfig, ProviderError>> + Send;
}
