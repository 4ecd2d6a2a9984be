//! One-step construction of clients from a [`TransmissionConfig`].

use mosaic_torrent_types::ClientError;
use tracing::debug;

use crate::adapter::{AsyncClientAdapter, ClientAdapter};
use crate::client::{AsyncClient, BlockingClient};
use crate::config::TransmissionConfig;
use crate::session::SessionStore;
use crate::transport::{AsyncTransport, BlockingTransport};

/// Builds the HTTP client, transport and client for a configuration.
#[derive(Debug, Clone, Copy)]
pub struct ClientFactory;

impl ClientFactory {
    /// A blocking client.
    ///
    /// Must not be called from within an async runtime, as the blocking `reqwest`
    /// client runs its own.
    pub fn blocking(config: &TransmissionConfig) -> Result<BlockingClient, ClientError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(build_error)?;

        debug!(url = %config.rpc_url, "Creating blocking Transmission client");
        let transport = BlockingTransport::new(http, config.rpc_url.clone(), session(config)?);
        Ok(BlockingClient::new(transport))
    }

    /// A non-blocking client.
    pub fn nonblocking(config: &TransmissionConfig) -> Result<AsyncClient, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(build_error)?;

        debug!(url = %config.rpc_url, "Creating non-blocking Transmission client");
        let transport = AsyncTransport::new(http, config.rpc_url.clone(), session(config)?);
        Ok(AsyncClient::new(transport))
    }

    /// A blocking client wrapped in an adapter.
    pub fn blocking_adapter(
        config: &TransmissionConfig,
    ) -> Result<ClientAdapter<BlockingClient>, ClientError> {
        Self::blocking(config).map(ClientAdapter::new)
    }

    /// A non-blocking client wrapped in an adapter.
    pub fn nonblocking_adapter(
        config: &TransmissionConfig,
    ) -> Result<AsyncClientAdapter<AsyncClient>, ClientError> {
        Self::nonblocking(config).map(AsyncClientAdapter::new)
    }
}

fn session(config: &TransmissionConfig) -> Result<SessionStore, ClientError> {
    SessionStore::with_credentials(config.username.as_deref(), config.password.as_deref())
}

fn build_error(err: reqwest::Error) -> ClientError {
    ClientError::Transport {
        status: None,
        source: Box::new(err),
    }
}
