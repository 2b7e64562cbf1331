use thiserror::Error;

/// Error type for Transmission RPC operations.
///
/// A reply whose `result` is not `"success"` is not an error: it is returned
/// to the caller as a regular [`TmResponse`](crate::TmResponse).
#[derive(Error, Debug)]
pub enum RpcError {
    /// The endpoint could not be built from the configuration.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Network-related errors (connection failures, timeouts, etc.)
    #[error("network error: {0}")]
    Network(String),

    /// The reply body is not a JSON envelope.
    #[error("invalid response body: {0}")]
    InvalidBody(String),

    /// The daemon answered 409 again after the session token was renewed.
    #[error("session token rejected after renewal")]
    SessionRejected,

    /// The reply was an envelope but its arguments lacked an expected shape.
    #[error("malformed {method} response: {reason}")]
    MalformedResponse {
        /// RPC method the reply belongs to.
        method: String,
        /// What was missing or wrong.
        reason: String,
    },

    /// Request arguments could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(String),

    /// The name does not match any torrent field.
    #[error("unknown torrent field: {0}")]
    UnknownField(String),
}

impl RpcError {
    /// Returns true for failures of the HTTP exchange itself, as opposed to
    /// configuration or decoding problems.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::InvalidBody(_) | Self::SessionRejected
        )
    }

    /// Shorthand for [`RpcError::MalformedResponse`].
    pub fn malformed(method: &str, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            method: method.to_owned(),
            reason: reason.into(),
        }
    }
}
