/// erd SDK - Network access.
///
/// Defines the provider contract every network backend implements, the
/// network data types, locally tracked accounts, cancellable timers and
/// the transaction status watcher.

pub mod account;
pub mod provider;
pub mod timer;
pub mod types;
pub mod watcher;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

mod error;
pub use account::Account;
pub use error::{HttpMethod, NetworkError, ProviderError};
pub use provider::Provider;
pub use timer::AsyncTimer;
pub use types::{AccountOnNetwork, NetworkConfig, VmQuery, VmQueryResponse};
pub use watcher::{TransactionWatcher, WatcherConfig};
