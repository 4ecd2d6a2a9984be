//! # Transmission RPC client.
//!
//! Talks to a Transmission daemon over its JSON-RPC endpoint, handling the session id
//! handshake transparently. Both a blocking and a non-blocking flavour are provided.
//!
//! usage:
//!
//! ```rust,ignore
//! use mosaic_transmission_rpc::{ClientFactory, TransmissionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TransmissionConfig::from_env()?;
//!     let client = ClientFactory::nonblocking_adapter(&config)?;
//!     let torrent = client.add("path/to/file.torrent").await?;
//!     client.start(&torrent).await?;
//!     for torrent in client.torrents(&[]).await? {
//!         println!("{}: {:.0}%", torrent.name, torrent.percent_done() * 100.0);
//!     }
//!     Ok(())
//! }
//! ```
//!

mod adapter;
mod client;
mod config;
mod conversions;
mod factory;
mod http;
mod ops;
mod request;
mod session;
mod transport;

#[cfg(test)]
mod testutil;

pub use adapter::{AsyncClientAdapter, Call, ClientAdapter};
pub use client::{AsyncClient, BlockingClient};
pub use config::{DEFAULT_RPC_URL, TransmissionConfig};
pub use factory::ClientFactory;
pub use http::{AsyncHttpSend, HttpRequest, HttpResponse, HttpSend};
pub use ops::{AsyncRpc, BlockingRpc};
pub use request::{DEFAULT_FIELDS, RpcMethod, RpcRequest, build_body};
pub use session::{SESSION_ID_HEADER, SessionStore};
pub use transport::{AsyncTransport, BlockingTransport};

pub use mosaic_torrent_types::{
    BlockingTorrentClient, ClientError, Torrent, TorrentClient, TorrentFile, TorrentId,
    TorrentRef, TorrentStatus,
};

#[cfg(test)]
use tracing_subscriber as _;
#[cfg(test)]
use wiremock as _;
