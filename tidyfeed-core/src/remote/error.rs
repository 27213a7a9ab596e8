use thiserror::Error;

/// Errors from [`crate::RankedFeedProvider::ranked_feed`].
///
/// Rankers treat every variant the same way: log it and fall back to the
/// next ranking path. The split exists for operators reading the logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankedFeedError {
    /// The request exceeded its deadline.
    #[error("ranked feed request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested endpoint.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The endpoint answered with a non-success status.
    #[error("ranked feed request to {url} failed with HTTP {status}: {message}")]
    Http {
        /// Requested endpoint.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response detail, when the body carried any.
        message: String,
    },
    /// The endpoint could not be reached.
    #[error("ranked feed request to {url} failed: {message}")]
    Network {
        /// Requested endpoint.
        url: String,
        /// Transport-level detail.
        message: String,
    },
    /// The response body did not match the row contract.
    #[error("ranked feed response could not be decoded: {message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
    },
    /// The backend reported a procedure-level failure.
    #[error("ranked feed procedure failed ({code}): {message}")]
    Service {
        /// Backend error code.
        code: String,
        /// Backend error message.
        message: String,
    },
}
