//! Error taxonomy shared by every layer of the remote-administration client.

use thiserror::Error;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, RemoteError>;

/// Every failure a remote call can surface. Exactly one is returned per failed call.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The configured shared key is not valid base64
    #[error("error decoding client key: {0}")]
    KeyDecoding(#[from] base64::DecodeError),

    /// Connection, timeout or body-read failure in the underlying transport
    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server answered with something that is not a conforming envelope
    #[error("malformed response envelope: {0}")]
    Protocol(#[source] serde_json::Error),

    /// The request body could not be encoded as JSON
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The server reported a failure in-band
    #[error("{message}")]
    Api { message: String },

    /// A mutation was requested on an entity that no client produced
    #[error("entity is not attached to a remote client")]
    Detached,
}

impl RemoteError {
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        RemoteError::Transport(err.into())
    }

    /// Server-side message when this is an API error.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            RemoteError::Api { message } => Some(message),
            _ => None,
        }
    }
}
