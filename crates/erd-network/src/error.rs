//! Error types for provider and watcher operations.

use std::fmt;

use erd_transaction::{TransactionHash, TransactionStatus};

/// HTTP verb of a failed provider request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
        }
    }
}

/// Errors raised by a [`Provider`](crate::Provider).
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// A request failed at the transport level, returned an error status,
    /// or returned a response that could not be understood.
    #[error("cannot {method} {url}: {message}")]
    RequestFailed {
        /// HTTP verb.
        method: HttpMethod,
        /// Full request URL.
        url: String,
        /// Error message from the transport or the remote service.
        message: String,
        /// Underlying transport error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The remote service answered with a body that does not have the
    /// expected shape.
    #[error("unexpected response from {url}: {message}")]
    UnexpectedResponse {
        /// Full request URL.
        url: String,
        /// What was wrong with the body.
        message: String,
    },

    /// The in-memory provider cannot answer.
    #[error("mock provider: {0}")]
    Mock(String),
}

impl ProviderError {
    /// A failed `GET`.
    pub fn get(
        url: impl Into<String>,
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        ProviderError::RequestFailed {
            method: HttpMethod::Get,
            url: url.into(),
            message: message.into(),
            source,
        }
    }

    /// A failed `POST`.
    pub fn post(
        url: impl Into<String>,
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        ProviderError::RequestFailed {
            method: HttpMethod::Post,
            url: url.into(),
            message: message.into(),
            source,
        }
    }
}

/// Errors raised by watchers and timers.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// The watcher timed out before the awaited status was observed.
    #[error(
        "transaction {hash} did not reach the expected status in time (last seen: {})",
        last_status.as_ref().map_or("none", TransactionStatus::as_str)
    )]
    ExpectedStatusNotReached {
        /// The watched transaction.
        hash: TransactionHash,
        /// The last status observed, if any.
        last_status: Option<TransactionStatus>,
    },

    /// `start` was called on a timer that is still running.
    #[error("timer {0} is already running")]
    TimerAlreadyRunning(String),

    /// The timer was aborted before it fired.
    #[error("timer {0} was aborted")]
    TimerAborted(String),

    /// A provider call failed.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
}
