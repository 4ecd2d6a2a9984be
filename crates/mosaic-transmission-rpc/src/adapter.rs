//! Client adapters turning raw daemon replies into [`Torrent`]s.
//!
//! An adapter decorates a client. Operations with a decoding hook (`torrents`, `add`,
//! `start`, `pause`, `delete`) return domain objects; the client trait itself is
//! implemented by forwarding every call to the wrapped client unchanged.

use std::any::type_name;

use mosaic_torrent_types::{
    BlockingTorrentClient, ClientError, Torrent, TorrentClient, TorrentId, TorrentRef,
};
use serde_json::Value;
use tracing::debug;

use crate::conversions::{added_torrent, ensure_success, torrents};

/// A client operation requested by name, with its arguments already validated.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    /// `get_torrents`, all torrents when empty.
    GetTorrents(Vec<TorrentId>),
    /// `add_torrent`
    AddTorrent(String),
    /// `start_torrent`
    StartTorrent(TorrentRef),
    /// `pause_torrent`
    PauseTorrent(TorrentRef),
    /// `delete_torrent`
    DeleteTorrent(TorrentRef),
}

impl Call {
    /// Parse `operation` and its untyped `arguments`.
    ///
    /// `client` names the client the call is meant for and is only used in the error
    /// for an unknown operation.
    pub fn parse(
        operation: &str,
        arguments: Vec<Value>,
        client: &str,
    ) -> Result<Self, ClientError> {
        match operation {
            "get_torrents" => ids(arguments).map(Self::GetTorrents),
            "add_torrent" => match single(operation, arguments)? {
                Value::String(path) => Ok(Self::AddTorrent(path)),
                other => Err(ClientError::InvalidArgument(format!(
                    "add_torrent expects a path, got {other}"
                ))),
            },
            "start_torrent" => reference(operation, arguments).map(Self::StartTorrent),
            "pause_torrent" => reference(operation, arguments).map(Self::PauseTorrent),
            "delete_torrent" => reference(operation, arguments).map(Self::DeleteTorrent),
            _ => Err(ClientError::UndefinedOperation {
                operation: operation.to_owned(),
                client: client.to_owned(),
            }),
        }
    }
}

fn single(operation: &str, arguments: Vec<Value>) -> Result<Value, ClientError> {
    let count = arguments.len();
    let mut arguments = arguments.into_iter();
    match (arguments.next(), count) {
        (Some(value), 1) => Ok(value),
        _ => Err(ClientError::InvalidArgument(format!(
            "{operation} expects exactly one argument, got {count}"
        ))),
    }
}

fn reference(operation: &str, arguments: Vec<Value>) -> Result<TorrentRef, ClientError> {
    TorrentRef::try_from(single(operation, arguments)?)
}

/// Ids may be passed one per argument or as a single array.
fn ids(arguments: Vec<Value>) -> Result<Vec<TorrentId>, ClientError> {
    let values = match <[Value; 1]>::try_from(arguments) {
        Ok([Value::Array(values)]) => values,
        Ok([value]) => vec![value],
        Err(arguments) => arguments,
    };

    values
        .into_iter()
        .map(|value| match value {
            Value::String(hash) => Ok(TorrentId::Hash(hash)),
            Value::Number(ref n) => n.as_i64().map(TorrentId::Id).ok_or_else(|| {
                ClientError::InvalidArgument(format!("invalid torrent id: {value}"))
            }),
            other => Err(ClientError::InvalidArgument(format!(
                "invalid torrent id: {other}"
            ))),
        })
        .collect()
}

/// Blocking client adapter.
#[derive(Debug)]
pub struct ClientAdapter<C> {
    client: C,
}

impl<C: BlockingTorrentClient> ClientAdapter<C> {
    /// Decorate `client`.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The decorated client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Torrents known to the daemon, all of them when `ids` is empty.
    pub fn torrents(&self, ids: &[TorrentId]) -> Result<Vec<Torrent>, ClientError> {
        let torrents = torrents(self.client.get_torrents(ids)?)?;
        debug!("Decoded {} torrents", torrents.len());
        Ok(torrents)
    }

    /// Add a torrent and return it as the daemon knows it.
    pub fn add(&self, path: &str) -> Result<Torrent, ClientError> {
        let torrent = added_torrent(self.client.add_torrent(path)?)?;
        debug!("Added {torrent:?}");
        Ok(torrent)
    }

    /// Start a torrent.
    pub fn start(&self, torrent: impl Into<TorrentRef>) -> Result<(), ClientError> {
        ensure_success(self.client.start_torrent(torrent.into())?)
    }

    /// Pause a torrent.
    pub fn pause(&self, torrent: impl Into<TorrentRef>) -> Result<(), ClientError> {
        ensure_success(self.client.pause_torrent(torrent.into())?)
    }

    /// Delete a torrent.
    pub fn delete(&self, torrent: impl Into<TorrentRef>) -> Result<(), ClientError> {
        ensure_success(self.client.delete_torrent(torrent.into())?)
    }

    /// Forward an operation given by name to the wrapped client, returning its raw reply.
    pub fn call(&self, operation: &str, arguments: Vec<Value>) -> Result<Value, ClientError> {
        match Call::parse(operation, arguments, type_name::<C>())? {
            Call::GetTorrents(ids) => self.client.get_torrents(&ids),
            Call::AddTorrent(path) => self.client.add_torrent(&path),
            Call::StartTorrent(torrent) => self.client.start_torrent(torrent),
            Call::PauseTorrent(torrent) => self.client.pause_torrent(torrent),
            Call::DeleteTorrent(torrent) => self.client.delete_torrent(torrent),
        }
    }
}

impl<C: BlockingTorrentClient> BlockingTorrentClient for ClientAdapter<C> {
    fn get_torrents(&self, ids: &[TorrentId]) -> Result<Value, ClientError> {
        self.client.get_torrents(ids)
    }

    fn add_torrent(&self, path: &str) -> Result<Value, ClientError> {
        self.client.add_torrent(path)
    }

    fn start_torrent(&self, torrent: TorrentRef) -> Result<Value, ClientError> {
        self.client.start_torrent(torrent)
    }

    fn pause_torrent(&self, torrent: TorrentRef) -> Result<Value, ClientError> {
        self.client.pause_torrent(torrent)
    }

    fn delete_torrent(&self, torrent: TorrentRef) -> Result<Value, ClientError> {
        self.client.delete_torrent(torrent)
    }
}

/// Non-blocking client adapter.
#[derive(Debug)]
pub struct AsyncClientAdapter<C> {
    client: C,
}

impl<C: TorrentClient> AsyncClientAdapter<C> {
    /// Decorate `client`.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The decorated client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Torrents known to the daemon, all of them when `ids` is empty.
    pub async fn torrents(&self, ids: &[TorrentId]) -> Result<Vec<Torrent>, ClientError> {
        let torrents = torrents(self.client.get_torrents(ids).await?)?;
        debug!("Decoded {} torrents", torrents.len());
        Ok(torrents)
    }

    /// Add a torrent and return it as the daemon knows it.
    pub async fn add(&self, path: &str) -> Result<Torrent, ClientError> {
        let torrent = added_torrent(self.client.add_torrent(path).await?)?;
        debug!("Added {torrent:?}");
        Ok(torrent)
    }

    /// Start a torrent.
    pub async fn start(&self, torrent: impl Into<TorrentRef>) -> Result<(), ClientError> {
        ensure_success(self.client.start_torrent(torrent.into()).await?)
    }

    /// Pause a torrent.
    pub async fn pause(&self, torrent: impl Into<TorrentRef>) -> Result<(), ClientError> {
        ensure_success(self.client.pause_torrent(torrent.into()).await?)
    }

    /// Delete a torrent.
    pub async fn delete(&self, torrent: impl Into<TorrentRef>) -> Result<(), ClientError> {
        ensure_success(self.client.delete_torrent(torrent.into()).await?)
    }

    /// Forward an operation given by name to the wrapped client, returning its raw reply.
    pub async fn call(&self, operation: &str, arguments: Vec<Value>) -> Result<Value, ClientError> {
        match Call::parse(operation, arguments, type_name::<C>())? {
            Call::GetTorrents(ids) => self.client.get_torrents(&ids).await,
            Call::AddTorrent(path) => self.client.add_torrent(&path).await,
            Call::StartTorrent(torrent) => self.client.start_torrent(torrent).await,
            Call::PauseTorrent(torrent) => self.client.pause_torrent(torrent).await,
            Call::DeleteTorrent(torrent) => self.client.delete_torrent(torrent).await,
        }
    }
}

impl<C: TorrentClient> TorrentClient for AsyncClientAdapter<C> {
    async fn get_torrents(&self, ids: &[TorrentId]) -> Result<Value, ClientError> {
        self.client.get_torrents(ids).await
    }

    async fn add_torrent(&self, path: &str) -> Result<Value, ClientError> {
        self.client.add_torrent(path).await
    }

    async fn start_torrent(&self, torrent: TorrentRef) -> Result<Value, ClientError> {
        self.client.start_torrent(torrent).await
    }

    async fn pause_torrent(&self, torrent: TorrentRef) -> Result<Value, ClientError> {
        self.client.pause_torrent(torrent).await
    }

    async fn delete_torrent(&self, torrent: TorrentRef) -> Result<Value, ClientError> {
        self.client.delete_torrent(torrent).await
    }
}
