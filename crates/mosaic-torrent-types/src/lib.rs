//! # Mosaic Torrent Types
//!
//! This crate defines the domain model, error type and client traits shared by the
//! torrent clients used in the Mosaic project.

use serde_json::Value;
use thiserror::Error;

mod torrent;

pub use torrent::{Torrent, TorrentFile, TorrentId, TorrentRef, TorrentStatus};

/// Boxed error used to carry the underlying HTTP failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for torrent client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Malformed caller input, detected before anything is sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The HTTP round trip itself failed (connection refused, timeout, ...).
    #[error("HTTP request failed: {source}")]
    Transport {
        /// Status code attached to the failure, if the HTTP layer reported one.
        status: Option<u16>,
        /// The underlying HTTP error.
        #[source]
        source: BoxError,
    },

    /// The daemon answered 409 without telling us the session id to use.
    #[error("missing session id header")]
    MissingSessionId,

    /// The daemon answered with something other than 200.
    #[error("\"{method}\" expected 200 response, got \"{status}\" instead, reason: \"{reason}\"")]
    UnexpectedStatus {
        /// RPC method that was called.
        method: String,
        /// HTTP status code.
        status: u16,
        /// Reason phrase for the status.
        reason: String,
    },

    /// The response body is not valid JSON.
    #[error("\"{method}\" did not get back a JSON response body ({source}), got \"{body}\" instead")]
    MalformedResponse {
        /// RPC method that was called.
        method: String,
        /// The parse error.
        #[source]
        source: serde_json::Error,
        /// The raw response body.
        body: String,
    },

    /// An operation was requested by name that the wrapped client does not have.
    #[error("undefined method: \"{operation}\" within client: \"{client}\"")]
    UndefinedOperation {
        /// The requested operation name.
        operation: String,
        /// Type name of the wrapped client.
        client: String,
    },

    /// The request body could not be serialized.
    #[error("failed to serialize request: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The daemon processed the call but reported a failure in its `result` field.
    #[error("daemon error: {0}")]
    Daemon(String),

    /// The daemon reply is valid JSON but not shaped as expected.
    #[error("unexpected payload: {0}")]
    UnexpectedPayload(String),
}

/// Blocking torrent client interface.
///
/// Implemented by the concrete clients and by the adapters that decorate them.
/// Every operation returns the decoded JSON reply of the daemon.
pub trait BlockingTorrentClient {
    /// Get torrents, all of them when `ids` is empty.
    fn get_torrents(&self, ids: &[TorrentId]) -> Result<Value, ClientError>;
    /// Add a torrent from a local path or URL of a `.torrent` file.
    fn add_torrent(&self, path: &str) -> Result<Value, ClientError>;
    /// Start a torrent.
    fn start_torrent(&self, torrent: TorrentRef) -> Result<Value, ClientError>;
    /// Pause a torrent.
    fn pause_torrent(&self, torrent: TorrentRef) -> Result<Value, ClientError>;
    /// Delete a torrent.
    fn delete_torrent(&self, torrent: TorrentRef) -> Result<Value, ClientError>;
}

/// Non-blocking version of [`BlockingTorrentClient`].
#[allow(async_fn_in_trait)]
pub trait TorrentClient {
    /// Get torrents, all of them when `ids` is empty.
    async fn get_torrents(&self, ids: &[TorrentId]) -> Result<Value, ClientError>;
    /// Add a torrent from a local path or URL of a `.torrent` file.
    async fn add_torrent(&self, path: &str) -> Result<Value, ClientError>;
    /// Start a torrent.
    async fn start_torrent(&self, torrent: TorrentRef) -> Result<Value, ClientError>;
    /// Pause a torrent.
    async fn pause_torrent(&self, torrent: TorrentRef) -> Result<Value, ClientError>;
    /// Delete a torrent.
    async fn delete_torrent(&self, torrent: TorrentRef) -> Result<Value, ClientError>;
}
