//! Client configuration: where the server lives and how to authenticate.

use shared::BASE_RESOURCE_PATH;
use std::fmt;
use std::time::Duration;

#[derive(Clone)]
pub struct ClientConfig {
    /// Scheme, host and optional port, e.g. `http://localhost:8080`
    pub remote_address: String,
    /// Base64-encoded shared secret
    pub key: String,
    pub base_resource_path: String,
    /// Applied to the whole request by the default transport
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(remote_address: impl Into<String>, key: impl Into<String>) -> Self {
        let remote_address = remote_address.into();
        Self {
            remote_address: remote_address.trim_end_matches('/').to_string(),
            key: key.into(),
            base_resource_path: BASE_RESOURCE_PATH.to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_base_resource_path(mut self, path: impl Into<String>) -> Self {
        self.base_resource_path = path.into();
        self
    }
}

// Keeps the secret out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("remote_address", &self.remote_address)
            .field("key", &"<redacted>")
            .field("base_resource_path", &self.base_resource_path)
            .field("timeout", &self.timeout)
            .finish()
    }
}
