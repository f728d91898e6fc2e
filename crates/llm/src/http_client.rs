//! HTTP Client Factory
//!
//! Provides a factory function for building reqwest clients with proxy and
//! timeout support.

use std::time::Duration;

use content_cascade_core::proxy::ProxyConfig;

use crate::types::{LlmError, LlmResult};

const USER_AGENT: &str = concat!("ContentCascade/", env!("CARGO_PKG_VERSION"));

/// Build a `reqwest::Client` with the resolved proxy configuration.
///
/// - `Some(proxy)` -> configure proxy on the client
/// - `None` -> explicitly disable proxy (`no_proxy`), ignoring env vars
/// - `timeout` -> whole-request deadline enforced by reqwest
pub fn build_http_client(
    proxy: Option<&ProxyConfig>,
    timeout: Option<Duration>,
) -> LlmResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    match proxy {
        Some(cfg) => {
            let url = cfg.url();
            let mut p = reqwest::Proxy::all(&url).map_err(|e| LlmError::InvalidRequest {
                message: format!("invalid proxy url {}: {}", url, e),
            })?;
            if let Some(u) = &cfg.username {
                p = p.basic_auth(u, cfg.password.as_deref().unwrap_or_default());
            }
            builder = builder.proxy(p);
        }
        None => {
            builder = builder.no_proxy();
        }
    }
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(|e| LlmError::Other {
        message: format!("failed to build HTTP client: {}", e),
    })
}

/// Map a transport-level reqwest error into an `LlmError`.
pub fn map_transport_error(err: reqwest::Error, timeout: Option<Duration>) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout {
            seconds: timeout.map(|t| t.as_secs()).unwrap_or_default(),
        }
    } else {
        LlmError::NetworkError {
            message: err.to_string(),
        }
    }
}
