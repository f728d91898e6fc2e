//! Proxy Configuration Types
//!
//! Data types for proxy configuration, shared by the model backend client and
//! the search client. The actual HTTP client factory is in the
//! `content-cascade-llm` crate.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Proxy protocol type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProxyProtocol {
    Http,
    Https,
    Socks5,
}

impl ProxyProtocol {
    /// Return the URL scheme string for this protocol.
    pub fn scheme(&self) -> &'static str {
        match self {
            ProxyProtocol::Http => "http",
            ProxyProtocol::Https => "https",
            ProxyProtocol::Socks5 => "socks5",
        }
    }

    fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme.to_ascii_lowercase().as_str() {
            "http" => Some(ProxyProtocol::Http),
            "https" => Some(ProxyProtocol::Https),
            "socks5" | "socks5h" => Some(ProxyProtocol::Socks5),
            _ => None,
        }
    }
}

/// Proxy configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProxyConfig {
    pub protocol: ProxyProtocol,
    pub host: String,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Password is only held in memory.
    /// Excluded from serialization so `config show` and `config init` never write it.
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
}

impl ProxyConfig {
    /// Parse a proxy URL of the form `scheme://[user[:pass]@]host:port`.
    pub fn parse(raw: &str) -> CoreResult<Self> {
        let raw = raw.trim();
        let (scheme, rest) = raw
            .split_once("://")
            .ok_or_else(|| CoreError::parse(format!("proxy url '{}' has no scheme", raw)))?;
        let protocol = ProxyProtocol::from_scheme(scheme)
            .ok_or_else(|| CoreError::parse(format!("unsupported proxy scheme '{}'", scheme)))?;

        let rest = rest.trim_end_matches('/');
        let (credentials, address) = match rest.rsplit_once('@') {
            Some((creds, addr)) => (Some(creds), addr),
            None => (None, rest),
        };

        let (host, port) = address
            .rsplit_once(':')
            .ok_or_else(|| CoreError::parse(format!("proxy url '{}' has no port", raw)))?;
        if host.is_empty() {
            return Err(CoreError::parse(format!("proxy url '{}' has no host", raw)));
        }
        let port: u16 = port
            .parse()
            .map_err(|_| CoreError::parse(format!("invalid proxy port '{}'", port)))?;

        let (username, password) = match credentials {
            Some(creds) => match creds.split_once(':') {
                Some((u, p)) => (Some(u.to_string()), Some(p.to_string())),
                None => (Some(creds.to_string()), None),
            },
            None => (None, None),
        };

        Ok(Self {
            protocol,
            host: host.to_string(),
            port,
            username,
            password,
        })
    }

    /// Build the proxy URL string (without auth).
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.protocol.scheme(), self.host, self.port)
    }
}
