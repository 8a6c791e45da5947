//! Process-wide settings handed to the builder and the transport.
//!
//! # Design
//! Nothing here is global. `ApiConfig` is owned by an `ApiClient` and passed
//! to every materialization; `TransportConfig` is consumed once when the
//! reqwest transport is built.

use std::time::Duration;

pub const DEFAULT_BASE_HOST: &str = "dummy.restapiexample.com";

const BASE_HOST_VAR: &str = "NETLAYER_BASE_HOST";
const AUTH_TOKEN_VAR: &str = "NETLAYER_AUTH_TOKEN";

/// Host and credential shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Host name, optionally with a `:port` suffix.
    pub base_host: String,
    /// Bearer token; empty means requests go out without `Authorization`.
    pub auth_token: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_host: DEFAULT_BASE_HOST.to_string(),
            auth_token: String::new(),
        }
    }
}

impl ApiConfig {
    pub fn new(base_host: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            base_host: base_host.into(),
            auth_token: auth_token.into(),
        }
    }

    /// Read `NETLAYER_BASE_HOST` and `NETLAYER_AUTH_TOKEN`, falling back to
    /// the defaults for anything unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_host: lookup(BASE_HOST_VAR).unwrap_or(defaults.base_host),
            auth_token: lookup(AUTH_TOKEN_VAR).unwrap_or(defaults.auth_token),
        }
    }
}

/// Timeout and connectivity policy for `ReqwestTransport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Maximum idle time while waiting for response data.
    pub request_timeout: Duration,
    /// Upper bound for the whole exchange, connectivity wait included.
    pub resource_timeout: Duration,
    /// Keep re-attempting the connection while the network is unreachable
    /// instead of failing on the first connect error.
    pub wait_for_connectivity: bool,
    /// Pause between connection attempts while waiting for connectivity.
    pub connectivity_poll_interval: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(60),
            resource_timeout: Duration::from_secs(300),
            wait_for_connectivity: true,
            connectivity_poll_interval: Duration::from_secs(1),
        }
    }
}
