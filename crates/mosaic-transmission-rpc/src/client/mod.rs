//! Transmission clients mapping torrent operations onto RPC calls.

use mosaic_torrent_types::{
    BlockingTorrentClient, ClientError, TorrentClient, TorrentId, TorrentRef,
};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::ops::{AsyncRpc, BlockingRpc};
use crate::request::RpcMethod;
use crate::transport::{AsyncTransport, BlockingTransport};


/// Blocking Transmission client.
#[derive(Debug)]
pub struct BlockingClient<T = BlockingTransport> {
    transport: T,
}

impl<T: BlockingRpc> BlockingClient<T> {
    /// Create a client calling through `transport`.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: BlockingRpc> BlockingTorrentClient for BlockingClient<T> {
    fn get_torrents(&self, ids: &[TorrentId]) -> Result<Value, ClientError> {
        debug!("Getting torrents {ids:?}");
        self.transport
            .perform_rpc_request(RpcMethod::Get, get_arguments(ids))
    }

    fn add_torrent(&self, path: &str) -> Result<Value, ClientError> {
        debug!("Adding torrent from file: {}", path);
        self.transport
            .perform_rpc_request(RpcMethod::Add, add_arguments(path)?)
    }

    fn start_torrent(&self, torrent: TorrentRef) -> Result<Value, ClientError> {
        let arguments = id_arguments(&torrent)?;
        debug!("Starting torrent {}", arguments["ids"]);
        self.transport.perform_rpc_request(RpcMethod::Start, arguments)
    }

    fn pause_torrent(&self, torrent: TorrentRef) -> Result<Value, ClientError> {
        let arguments = id_arguments(&torrent)?;
        debug!("Pausing torrent {}", arguments["ids"]);
        self.transport.perform_rpc_request(RpcMethod::Stop, arguments)
    }

    fn delete_torrent(&self, torrent: TorrentRef) -> Result<Value, ClientError> {
        let arguments = id_arguments(&torrent)?;
        debug!("Deleting torrent {}", arguments["ids"]);
        self.transport
            .perform_rpc_request(RpcMethod::Remove, arguments)
    }
}

/// Non-blocking Transmission client.
#[derive(Debug)]
pub struct AsyncClient<T = AsyncTransport> {
    transport: T,
}

impl<T: AsyncRpc> AsyncClient<T> {
    /// Create a client calling through `transport`.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: AsyncRpc> TorrentClient for AsyncClient<T> {
    async fn get_torrents(&self, ids: &[TorrentId]) -> Result<Value, ClientError> {
        debug!("Getting torrents {ids:?}");
        self.transport
            .perform_rpc_request(RpcMethod::Get, get_arguments(ids))
            .await
    }

    async fn add_torrent(&self, path: &str) -> Result<Value, ClientError> {
        debug!("Adding torrent from file: {}", path);
        self.transport
            .perform_rpc_request(RpcMethod::Add, add_arguments(path)?)
            .await
    }

    async fn start_torrent(&self, torrent: TorrentRef) -> Result<Value, ClientError> {
        let arguments = id_arguments(&torrent)?;
        debug!("Starting torrent {}", arguments["ids"]);
        self.transport
            .perform_rpc_request(RpcMethod::Start, arguments)
            .await
    }

    async fn pause_torrent(&self, torrent: TorrentRef) -> Result<Value, ClientError> {
        let arguments = id_arguments(&torrent)?;
        debug!("Pausing torrent {}", arguments["ids"]);
        self.transport
            .perform_rpc_request(RpcMethod::Stop, arguments)
            .await
    }

    async fn delete_torrent(&self, torrent: TorrentRef) -> Result<Value, ClientError> {
        let arguments = id_arguments(&torrent)?;
        debug!("Deleting torrent {}", arguments["ids"]);
        self.transport
            .perform_rpc_request(RpcMethod::Remove, arguments)
            .await
    }
}

/// `{ids}` only when specific torrents are asked for; no ids means all of them.
fn get_arguments(ids: &[TorrentId]) -> Map<String, Value> {
    let mut arguments = Map::new();
    if !ids.is_empty() {
        arguments.insert("ids".to_owned(), json!(ids));
    }
    arguments
}

fn add_arguments(path: &str) -> Result<Map<String, Value>, ClientError> {
    if path.is_empty() {
        return Err(ClientError::InvalidArgument(
            "a path to a .torrent file is required".into(),
        ));
    }
    let mut arguments = Map::new();
    arguments.insert("filename".to_owned(), json!(path));
    Ok(arguments)
}

fn id_arguments(torrent: &TorrentRef) -> Result<Map<String, Value>, ClientError> {
    let id = torrent.resolve()?;
    let mut arguments = Map::new();
    arguments.insert("ids".to_owned(), json!(id));
    Ok(arguments)
}
