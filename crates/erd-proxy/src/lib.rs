/// erd SDK - HTTP proxy provider.
///
/// Implements the network provider contract over the proxy's REST API,
/// unwrapping its `{data, error, code}` response envelopes.

pub mod client;
pub mod types;

pub use client::ProxyProvider;
pub use types::{ProxyConfig, DEVNET_GATEWAY, MAINNET_GATEWAY, TESTNET_GATEWAY};

#[cfg(test)]
mod tests;
