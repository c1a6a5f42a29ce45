//! Waiting for a submitted transaction to reach a status.
//!
//! The watcher polls the provider at a fixed interval until the awaited
//! condition holds or the timeout elapses. Polling starts immediately.
//! The timeout is checked before every poll and interrupts both an
//! in-flight status request and the wait between polls, so no request is
//! issued after the watcher has given up.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use erd_transaction::{TransactionHash, TransactionStatus};

use crate::error::NetworkError;
use crate::provider::Provider;
use crate::timer::AsyncTimer;

/// Default interval between status polls.
pub const DEFAULT_POLLING_INTERVAL: Duration = Duration::from_secs(5);

/// Default number of polling intervals before giving up.
pub const DEFAULT_TIMEOUT_MULTIPLE: u32 = 10;

/// Polling settings of a [`TransactionWatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatcherConfig {
    /// Time between two status polls.
    pub polling_interval: Duration,
    /// Total time before the watcher gives up.
    pub timeout: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        WatcherConfig {
            polling_interval: DEFAULT_POLLING_INTERVAL,
            timeout: DEFAULT_POLLING_INTERVAL * DEFAULT_TIMEOUT_MULTIPLE,
        }
    }
}

impl WatcherConfig {
    /// Poll every `polling_interval`, give up after `timeout`.
    pub fn new(polling_interval: Duration, timeout: Duration) -> Self {
        WatcherConfig {
            polling_interval,
            timeout,
        }
    }
}

/// Watches the status of one submitted transaction.
#[derive(Debug)]
pub struct TransactionWatcher<'a, P> {
    hash: TransactionHash,
    provider: &'a P,
    config: WatcherConfig,
}

enum PollOutcome {
    Reached(TransactionStatus),
    Stopped { last_seen: Option<TransactionStatus> },
}

impl<'a, P: Provider> TransactionWatcher<'a, P> {
    /// Watch `hash` with the default settings.
    pub fn new(hash: TransactionHash, provider: &'a P) -> Self {
        Self::with_config(hash, provider, WatcherConfig::default())
    }

    /// Watch `hash` with explicit settings.
    pub fn with_config(hash: TransactionHash, provider: &'a P, config: WatcherConfig) -> Self {
        TransactionWatcher {
            hash,
            provider,
            config,
        }
    }

    /// The watched transaction.
    pub fn hash(&self) -> &TransactionHash {
        &self.hash
    }

    /// Wait until the transaction is pending.
    pub async fn await_pending(&self) -> Result<TransactionStatus, NetworkError> {
        self.await_condition(TransactionStatus::is_pending).await
    }

    /// Wait until the transaction is executed, successfully or not.
    pub async fn await_executed(&self) -> Result<TransactionStatus, NetworkError> {
        self.await_condition(TransactionStatus::is_executed).await
    }

    /// Wait until the transaction reports exactly `awaited`.
    pub async fn await_status(
        &self,
        awaited: &TransactionStatus,
    ) -> Result<TransactionStatus, NetworkError> {
        self.await_condition(|status| status == awaited).await
    }

    /// Wait until `is_awaited` holds for the reported status.
    ///
    /// Provider errors while polling are logged and polling continues.
    ///
    /// # Returns
    /// The first status satisfying the condition, or
    /// `ExpectedStatusNotReached` carrying the last status seen when the
    /// timeout elapses first.
    pub async fn await_condition<F>(&self, is_awaited: F) -> Result<TransactionStatus, NetworkError>
    where
        F: Fn(&TransactionStatus) -> bool,
    {
        let timeout = AsyncTimer::new(format!("watcher timeout {}", self.hash));
        let periodic = AsyncTimer::new(format!("watcher poll {}", self.hash));
        let stopped = CancellationToken::new();

        let timed_out = timeout.start(self.config.timeout)?;
        let timeout_branch = async {
            if timed_out.await.is_ok() {
                debug!(hash = %self.hash, timeout = ?self.config.timeout, "watcher timed out");
                stopped.cancel();
            }
        };
        let polling_branch = async {
            let outcome = self.poll(&periodic, &stopped, &is_awaited).await;
            timeout.abort();
            outcome
        };

        let ((), outcome) = tokio::join!(timeout_branch, polling_branch);
        match outcome? {
            PollOutcome::Reached(status) => Ok(status),
            PollOutcome::Stopped { last_seen } => Err(NetworkError::ExpectedStatusNotReached {
                hash: self.hash.clone(),
                last_status: last_seen,
            }),
        }
    }

    async fn poll<F>(
        &self,
        periodic: &AsyncTimer,
        stopped: &CancellationToken,
        is_awaited: &F,
    ) -> Result<PollOutcome, NetworkError>
    where
        F: Fn(&TransactionStatus) -> bool,
    {
        let mut last_seen = None;
        loop {
            if stopped.is_cancelled() {
                return Ok(PollOutcome::Stopped { last_seen });
            }

            let fetched = tokio::select! {
                biased;
                _ = stopped.cancelled() => return Ok(PollOutcome::Stopped { last_seen }),
                fetched = self.provider.get_transaction_status(&self.hash) => fetched,
            };
            match fetched {
                Ok(status) => {
                    trace!(hash = %self.hash, %status, "polled transaction status");
                    if is_awaited(&status) {
                        return Ok(PollOutcome::Reached(status));
                    }
                    last_seen = Some(status);
                }
                Err(err) => {
                    debug!(hash = %self.hash, error = %err, "cannot fetch transaction status");
                }
            }

            let tick = periodic.start(self.config.polling_interval)?;
            tokio::select! {
                biased;
                _ = stopped.cancelled() => {
                    periodic.abort();
                    return Ok(PollOutcome::Stopped { last_seen });
                }
                _ = tick => {}
            }
        }
    }
}
