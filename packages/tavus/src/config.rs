//! Client configuration and the process-wide default.
//!
//! A [`Configuration`] is resolved once when a [`Client`](crate::Client) is
//! built and never changes afterwards. Fields the caller leaves unset fall
//! back to the process-wide default, which can be seeded with [`configure`]:
//!
//! ```ignore
//! tavus::configure(|config| {
//!     config.api_key = Some("my-key".to_string());
//! });
//!
//! let client = tavus::Client::builder().build()?;
//! ```
//!
//! The process-wide default is meant to be set up once, before clients are
//! created from several threads. Changing it later does not affect clients
//! that already exist.

use std::sync::RwLock;
use std::time::Duration;

use lazy_static::lazy_static;

pub const DEFAULT_BASE_URL: &str = "https://tavusapi.com";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Sent as `x-api-key` on every request. Required.
    pub api_key: Option<String>,
    pub base_url: String,
    /// Applied to both the connect and the read phase of each request.
    pub timeout: Duration,
}

impl Configuration {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// True when an API key is present and non-empty.
    pub fn is_valid(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    static ref GLOBAL: RwLock<Configuration> = RwLock::new(Configuration::new());
}

/// Mutate the process-wide default configuration.
pub fn configure<F>(f: F)
where
    F: FnOnce(&mut Configuration),
{
    let mut global = GLOBAL.write().unwrap_or_else(|e| e.into_inner());
    f(&mut global);
}

/// Snapshot of the process-wide default configuration.
pub fn configuration() -> Configuration {
    GLOBAL.read().unwrap_or_else(|e| e.into_inner()).clone()
}

/// Restore the process-wide default to its initial state.
pub fn reset_configuration() {
    *GLOBAL.write().unwrap_or_else(|e| e.into_inner()) = Configuration::new();
}
