//! Connection settings for a Transmission daemon.

use std::time::Duration;

use mosaic_torrent_types::ClientError;
use url::Url;

/// Endpoint used when none is configured.
pub const DEFAULT_RPC_URL: &str = "http://localhost:9091/transmission/rpc";

/// Where the daemon lives and how to authenticate with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransmissionConfig {
    /// RPC endpoint.
    pub rpc_url: Url,
    /// Basic auth user name.
    pub username: Option<String>,
    /// Basic auth password.
    pub password: Option<String>,
    /// Timeout applied by the HTTP client to each request. `None` keeps the HTTP
    /// client's default.
    pub timeout: Option<Duration>,
}

impl TransmissionConfig {
    /// Configuration for the daemon at `rpc_url`, without credentials.
    pub fn new(rpc_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            rpc_url: parse_url(rpc_url)?,
            username: None,
            password: None,
            timeout: None,
        })
    }

    /// Use basic auth.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read the configuration from the process environment.
    ///
    /// - `TRANSMISSION_RPC_URL` (default: [`DEFAULT_RPC_URL`])
    /// - `TRANSMISSION_USERNAME`, `TRANSMISSION_PASSWORD`
    /// - `TRANSMISSION_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`TransmissionConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let rpc_url = lookup("TRANSMISSION_RPC_URL");
        let mut config = Self::new(rpc_url.as_deref().unwrap_or(DEFAULT_RPC_URL))?;
        config.username = lookup("TRANSMISSION_USERNAME");
        config.password = lookup("TRANSMISSION_PASSWORD");
        config.timeout = lookup("TRANSMISSION_TIMEOUT_SECS")
            .map(|secs| {
                secs.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| {
                        ClientError::InvalidArgument(format!("invalid timeout {secs:?}: {e}"))
                    })
            })
            .transpose()?;
        Ok(config)
    }
}

fn parse_url(rpc_url: &str) -> Result<Url, ClientError> {
    let url = Url::parse(rpc_url)
        .map_err(|e| ClientError::InvalidArgument(format!("Invalid RPC URL: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ClientError::InvalidArgument(format!(
            "Invalid RPC URL: unsupported scheme {scheme}"
        ))),
    }
}
