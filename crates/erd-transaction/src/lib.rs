/// erd SDK - Transaction model and canonical serialization.
///
/// Provides the Transaction type, its canonical signing form, data
/// payloads (including smart contract call encoding), and the hash and
/// status types reported by the network.

pub mod payload;
pub mod status;
pub mod transaction;

mod error;
pub use error::TransactionError;
pub use payload::{ContractCallBuilder, TransactionPayload};
pub use status::{TransactionHash, TransactionStatus};
pub use transaction::{PlainTransaction, Transaction};
