#![deny(missing_docs)]

//! erd SDK - Complete SDK.
//!
//! Re-exports all erd SDK components for convenient single-crate usage,
//! and adds [`Context`], which ties a provider, a signer and the network
//! parameters together for the common build, sign, send and await flow.

pub use erd_message as message;
pub use erd_network as network;
pub use erd_primitives as primitives;
pub use erd_proxy as proxy;
pub use erd_transaction as transaction;
pub use erd_wallet as wallet;

pub mod context;
pub mod error;

pub use context::Context;
pub use error::SdkError;
