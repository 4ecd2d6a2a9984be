//! Torrent domain objects and torrent references.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ClientError;

// Field names follow the Transmission RPC schema, as this is the initial implementation.
// Other implementations are expected to have similar fields.

/// Torrent information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)] // rationale: these are the same fields as in Transmission RPC
pub struct Torrent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub hash_string: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub size_when_done: i64,

    #[serde(default)]
    pub status: TorrentStatus,

    #[serde(default)]
    pub rate_download: i64,

    #[serde(default)]
    pub rate_upload: i64,

    #[serde(default)]
    pub uploaded_ever: i64,

    #[serde(default)]
    pub files: Vec<TorrentFile>,

    #[serde(default)]
    pub error_string: String,
}

impl Torrent {
    /// Fraction of the torrent's files already downloaded, in `0.0..=1.0`.
    pub fn percent_done(&self) -> f64 {
        let (done, total) = self
            .files
            .iter()
            .fold((0i64, 0i64), |(done, total), f| {
                (done + f.bytes_completed, total + f.length)
            });
        if total == 0 {
            return 0.0;
        }
        done as f64 / total as f64
    }

    /// Whether the daemon reported an error for this torrent.
    pub fn has_error(&self) -> bool {
        !self.error_string.is_empty()
    }
}

/// A single file inside a torrent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TorrentFile {
    /// Path of the file relative to the download directory.
    pub name: String,
    /// Size in bytes.
    #[serde(default)]
    pub length: i64,
    /// Bytes downloaded so far.
    #[serde(default)]
    pub bytes_completed: i64,
}

impl TorrentFile {
    /// Whether every byte of the file has been downloaded.
    pub fn is_complete(&self) -> bool {
        self.bytes_completed >= self.length
    }
}

/// Torrent activity as reported by the daemon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum TorrentStatus {
    /// Torrent is stopped.
    #[default]
    Stopped,
    /// Queued to verify local data.
    CheckWait,
    /// Verifying local data.
    Checking,
    /// Queued to download.
    DownloadWait,
    /// Downloading.
    Downloading,
    /// Queued to seed.
    SeedWait,
    /// Seeding.
    Seeding,
    /// A status code this client does not know about.
    Unknown(i64),
}

impl From<i64> for TorrentStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::Stopped,
            1 => Self::CheckWait,
            2 => Self::Checking,
            3 => Self::DownloadWait,
            4 => Self::Downloading,
            5 => Self::SeedWait,
            6 => Self::Seeding,
            other => Self::Unknown(other),
        }
    }
}

impl From<TorrentStatus> for i64 {
    fn from(status: TorrentStatus) -> Self {
        match status {
            TorrentStatus::Stopped => 0,
            TorrentStatus::CheckWait => 1,
            TorrentStatus::Checking => 2,
            TorrentStatus::DownloadWait => 3,
            TorrentStatus::Downloading => 4,
            TorrentStatus::SeedWait => 5,
            TorrentStatus::Seeding => 6,
            TorrentStatus::Unknown(code) => code,
        }
    }
}

/// Scalar torrent identifier understood by the daemon: a numeric id or a hash string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TorrentId {
    /// Session-local numeric id.
    Id(i64),
    /// Info hash.
    Hash(String),
}

impl fmt::Display for TorrentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Hash(hash) => f.write_str(hash),
        }
    }
}

impl From<i64> for TorrentId {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for TorrentId {
    fn from(hash: &str) -> Self {
        Self::Hash(hash.to_owned())
    }
}

impl From<String> for TorrentId {
    fn from(hash: String) -> Self {
        Self::Hash(hash)
    }
}

/// Caller-supplied reference to a torrent.
#[derive(Debug, Clone, PartialEq)]
pub enum TorrentRef {
    /// A torrent previously returned by the daemon; identified by its hash.
    Torrent(Box<Torrent>),
    /// Numeric id.
    Id(i64),
    /// Hash string.
    Hash(String),
}

impl TorrentRef {
    /// Normalise the reference to the scalar identifier sent over RPC.
    pub fn resolve(&self) -> Result<TorrentId, ClientError> {
        let hash = match self {
            Self::Id(id) => return Ok(TorrentId::Id(*id)),
            Self::Torrent(torrent) => &torrent.hash_string,
            Self::Hash(hash) => hash,
        };
        if hash.is_empty() {
            return Err(ClientError::InvalidArgument(
                "unable to extract torrent id from an empty hash string".into(),
            ));
        }
        Ok(TorrentId::Hash(hash.clone()))
    }
}

impl From<Torrent> for TorrentRef {
    fn from(torrent: Torrent) -> Self {
        Self::Torrent(Box::new(torrent))
    }
}

impl From<&Torrent> for TorrentRef {
    fn from(torrent: &Torrent) -> Self {
        Self::Torrent(Box::new(torrent.clone()))
    }
}

impl From<i64> for TorrentRef {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for TorrentRef {
    fn from(hash: &str) -> Self {
        Self::Hash(hash.to_owned())
    }
}

impl From<String> for TorrentRef {
    fn from(hash: String) -> Self {
        Self::Hash(hash)
    }
}

impl From<TorrentId> for TorrentRef {
    fn from(id: TorrentId) -> Self {
        match id {
            TorrentId::Id(id) => Self::Id(id),
            TorrentId::Hash(hash) => Self::Hash(hash),
        }
    }
}

/// Untyped references arrive from by-name calls; only strings, integers and
/// torrent objects are accepted.
impl TryFrom<Value> for TorrentRef {
    type Error = ClientError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(hash) => Ok(Self::Hash(hash)),
            Value::Number(ref n) => n.as_i64().map(Self::Id).ok_or_else(|| unsupported(&value)),
            Value::Object(_) => serde_json::from_value::<Torrent>(value.clone())
                .map(Self::from)
                .map_err(|_| unsupported(&value)),
            other => Err(unsupported(&other)),
        }
    }
}

fn unsupported(value: &Value) -> ClientError {
    ClientError::InvalidArgument(format!(
        "unable to extract torrent id from supplied data: {value}"
    ))
}
