//! RPC request construction shared by the blocking and async transports.

use std::fmt;

use mosaic_torrent_types::ClientError;
use serde_json::{Map, Value, json};

/// Torrent attributes the daemon is asked to return unless the caller overrides `fields`.
pub const DEFAULT_FIELDS: [&str; 9] = [
    "hashString",
    "name",
    "sizeWhenDone",
    "status",
    "rateDownload",
    "rateUpload",
    "uploadedEver",
    "files",
    "errorString",
];

/// RPC methods this client knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcMethod {
    /// `torrent-get`
    Get,
    /// `torrent-add`
    Add,
    /// `torrent-remove`
    Remove,
    /// `torrent-start`
    Start,
    /// `torrent-stop`
    Stop,
}

impl RpcMethod {
    /// Method name as understood by the daemon.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "torrent-get",
            Self::Add => "torrent-add",
            Self::Remove => "torrent-remove",
            Self::Start => "torrent-start",
            Self::Stop => "torrent-stop",
        }
    }
}

impl fmt::Display for RpcMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A method call with its arguments, default fields already merged in.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcRequest {
    method: RpcMethod,
    arguments: Map<String, Value>,
}

impl RpcRequest {
    /// Merge `arguments` over the default arguments. Caller keys win.
    pub fn new(method: RpcMethod, arguments: Map<String, Value>) -> Self {
        let mut merged = Map::new();
        merged.insert("fields".to_owned(), json!(DEFAULT_FIELDS));
        merged.extend(arguments);
        Self {
            method,
            arguments: merged,
        }
    }

    /// The RPC method.
    pub fn method(&self) -> RpcMethod {
        self.method
    }

    /// The merged arguments object.
    pub fn arguments(&self) -> &Map<String, Value> {
        &self.arguments
    }

    /// Serialize to the `{"method": ..., "arguments": {...}}` envelope.
    pub fn to_body(&self) -> Result<String, ClientError> {
        let envelope = json!({
            "method": self.method.as_str(),
            "arguments": self.arguments,
        });
        serde_json::to_string(&envelope).map_err(ClientError::Serialization)
    }
}

/// Build the serialized request body for `method`.
pub fn build_body(method: RpcMethod, arguments: Map<String, Value>) -> Result<String, ClientError> {
    RpcRequest::new(method, arguments).to_body()
}
