//! Locally tracked account state.

use erd_primitives::{Address, Balance};

use crate::error::ProviderError;
use crate::provider::Provider;

/// An account whose nonce is tracked locally between syncs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Account address.
    pub address: Address,
    /// Next nonce to use.
    pub nonce: u64,
    /// Last known balance.
    pub balance: Balance,
}

impl Account {
    /// A fresh account with nonce 0 and zero balance.
    pub fn new(address: Address) -> Self {
        Account {
            address,
            nonce: 0,
            balance: Balance::zero(),
        }
    }

    /// Refresh nonce and balance from the network.
    pub async fn sync<P: Provider>(&mut self, provider: &P) -> Result<(), ProviderError> {
        let on_network = provider.get_account(&self.address).await?;
        tracing::debug!(
            address = %self.address,
            nonce = on_network.nonce,
            balance = %on_network.balance,
            "account synced"
        );
        self.nonce = on_network.nonce;
        self.balance = on_network.balance;
        Ok(())
    }

    /// Return the current nonce and advance it by one.
    pub fn get_nonce_then_increment(&mut self) -> u64 {
        let nonce = self.nonce;
        self.nonce += 1;
        nonce
    }

    /// Advance the nonce by one.
    pub fn increment_nonce(&mut self) {
        self.nonce += 1;
    }
}
