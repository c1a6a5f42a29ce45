//! Explicitly wired SDK context.
//!
//! A [`Context`] owns a provider, a signer, the network parameters and the
//! signer's locally tracked account. It prepares transfers with the
//! network's gas and chain settings, signs and submits them, and keeps the
//! account nonce in step with what was sent.

use tracing::info;

use erd_message::Message;
use erd_network::{Account, NetworkConfig, Provider, TransactionWatcher, WatcherConfig};
use erd_primitives::{Address, Balance};
use erd_transaction::{Transaction, TransactionHash, TransactionPayload, TransactionStatus};
use erd_wallet::Signer;

use crate::error::SdkError;

/// A provider, a signer and the parameters needed to transact.
#[derive(Debug)]
pub struct Context<P, S> {
    provider: P,
    signer: S,
    network_config: NetworkConfig,
    watcher_config: WatcherConfig,
    account: Account,
}

impl<P: Provider, S: Signer> Context<P, S> {
    /// Build a context without touching the network.
    ///
    /// The account starts at nonce 0; call [`sync_account`](Self::sync_account)
    /// before sending.
    pub fn new(provider: P, signer: S, address: Address, network_config: NetworkConfig) -> Self {
        Context {
            provider,
            signer,
            network_config,
            watcher_config: WatcherConfig::default(),
            account: Account::new(address),
        }
    }

    /// Build a context from the network's current config and account state.
    ///
    /// # Arguments
    /// * `provider` - Network access.
    /// * `signer` - Signs on behalf of the account.
    ///
    /// # Returns
    /// A synced context, or the first provider or signer error.
    pub async fn connect(provider: P, signer: S) -> Result<Self, SdkError> {
        let network_config = provider.get_network_config().await?;
        let address = signer.get_address().await?;
        let mut context = Self::new(provider, signer, address, network_config);
        context.sync_account().await?;
        info!(
            address = %context.account.address,
            chain_id = %context.network_config.chain_id,
            nonce = context.account.nonce,
            "context connected"
        );
        Ok(context)
    }

    /// Replace the watcher settings used by [`watcher`](Self::watcher).
    pub fn with_watcher_config(mut self, watcher_config: WatcherConfig) -> Self {
        self.watcher_config = watcher_config;
        self
    }

    /// The provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The signer.
    pub fn signer(&self) -> &S {
        &self.signer
    }

    /// The network parameters in use.
    pub fn network_config(&self) -> &NetworkConfig {
        &self.network_config
    }

    /// The signer's locally tracked account.
    pub fn account(&self) -> &Account {
        &self.account
    }

    /// Refetch the network parameters.
    pub async fn sync_network_config(&mut self) -> Result<(), SdkError> {
        self.network_config = self.provider.get_network_config().await?;
        Ok(())
    }

    /// Refetch the account's nonce and balance.
    pub async fn sync_account(&mut self) -> Result<(), SdkError> {
        self.account.sync(&self.provider).await?;
        Ok(())
    }

    /// An unsigned transfer from the account at its current nonce.
    ///
    /// Gas price, chain id and version come from the network config; the
    /// gas limit covers the payload.
    pub fn prepare_transfer(
        &self,
        receiver: Address,
        value: Balance,
        data: TransactionPayload,
    ) -> Transaction {
        let config = &self.network_config;
        let mut tx = Transaction::new(self.account.address, receiver);
        tx.nonce = self.account.nonce;
        tx.value = value;
        tx.gas_price = config.min_gas_price;
        tx.gas_limit = config.gas_limit_for_payload(data.len());
        tx.data = data;
        tx.chain_id = config.chain_id.clone();
        tx.version = config.min_transaction_version;
        tx
    }

    /// Sign `tx`, submit it, and advance the local nonce past it.
    pub async fn sign_and_send(&mut self, tx: &mut Transaction) -> Result<TransactionHash, SdkError> {
        self.signer.sign(tx).await?;
        let hash = self.provider.send_transaction(tx).await?;
        self.account.nonce = self.account.nonce.max(tx.nonce + 1);
        Ok(hash)
    }

    /// Sign and submit `tx`, then wait until it is executed.
    pub async fn send_and_await_executed(
        &mut self,
        tx: &mut Transaction,
    ) -> Result<TransactionStatus, SdkError> {
        let hash = self.sign_and_send(tx).await?;
        let status = self.watcher(hash).await_executed().await?;
        Ok(status)
    }

    /// Sign a message with the context's signer.
    pub async fn sign_message(&self, message: &mut Message) -> Result<(), SdkError> {
        self.signer.sign(message).await?;
        Ok(())
    }

    /// A watcher for `hash` using the context's watcher settings.
    pub fn watcher(&self, hash: TransactionHash) -> TransactionWatcher<'_, P> {
        TransactionWatcher::with_config(hash, &self.provider, self.watcher_config)
    }
}
