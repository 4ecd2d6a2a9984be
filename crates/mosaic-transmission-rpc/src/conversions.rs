//! Decoding of Transmission replies into domain objects.
//!
//! Every reply is wrapped as `{"result": "...", "arguments": {...}}`, where `result`
//! is `"success"` or a human-readable error from the daemon.

use mosaic_torrent_types::{ClientError, Torrent};
use serde_json::{Map, Value};

/// Unwrap a reply, failing if the daemon did not report success.
pub(crate) fn success_arguments(response: Value) -> Result<Map<String, Value>, ClientError> {
    let mut envelope = match response {
        Value::Object(envelope) => envelope,
        other => {
            return Err(ClientError::UnexpectedPayload(format!(
                "expected a JSON object, got {other}"
            )));
        }
    };

    match envelope.remove("result") {
        Some(Value::String(result)) if result == "success" => {}
        Some(Value::String(result)) => return Err(ClientError::Daemon(result)),
        _ => {
            return Err(ClientError::UnexpectedPayload(
                "missing result field".into(),
            ));
        }
    }

    match envelope.remove("arguments") {
        Some(Value::Object(arguments)) => Ok(arguments),
        None => Ok(Map::new()),
        Some(other) => Err(ClientError::UnexpectedPayload(format!(
            "arguments is not an object: {other}"
        ))),
    }
}

/// Check a reply that carries nothing of interest besides its result.
pub(crate) fn ensure_success(response: Value) -> Result<(), ClientError> {
    success_arguments(response).map(drop)
}

/// Torrents of a `torrent-get` reply.
pub(crate) fn torrents(response: Value) -> Result<Vec<Torrent>, ClientError> {
    let mut arguments = success_arguments(response)?;
    let torrents = arguments
        .remove("torrents")
        .ok_or_else(|| ClientError::UnexpectedPayload("missing torrents list".into()))?;

    serde_json::from_value(torrents)
        .map_err(|e| ClientError::UnexpectedPayload(format!("invalid torrent list: {e}")))
}

/// Torrent of a `torrent-add` reply. Adding a torrent the daemon already has is not an
/// error; the existing torrent is returned.
pub(crate) fn added_torrent(response: Value) -> Result<Torrent, ClientError> {
    let mut arguments = success_arguments(response)?;
    let torrent = arguments
        .remove("torrent-added")
        .or_else(|| arguments.remove("torrent-duplicate"))
        .ok_or_else(|| ClientError::UnexpectedPayload("no torrent returned".into()))?;

    serde_json::from_value(torrent)
        .map_err(|e| ClientError::UnexpectedPayload(format!("invalid torrent: {e}")))
}
