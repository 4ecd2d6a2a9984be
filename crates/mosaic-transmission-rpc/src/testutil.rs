//! Shared test utilities and fixtures.

use mosaic_torrent_types::{Torrent, TorrentFile, TorrentStatus};
use reqwest::{StatusCode, header::HeaderValue};
use serde_json::{Value, json};
use url::Url;

use crate::http::HttpResponse;
use crate::session::SESSION_ID_HEADER;

pub(crate) fn rpc_url() -> Url {
    Url::parse("http://localhost:9091/transmission/rpc").unwrap()
}

pub(crate) fn make_test_torrent(id: i64, name: &str, hash: &str) -> Torrent {
    Torrent {
        id: Some(id),
        hash_string: hash.to_string(),
        name: name.to_string(),
        size_when_done: 1000,
        status: TorrentStatus::Downloading,
        rate_download: 100,
        rate_upload: 0,
        uploaded_ever: 0,
        files: vec![TorrentFile {
            name: name.to_string(),
            length: 1000,
            bytes_completed: 500,
        }],
        error_string: String::new(),
    }
}

/// Torrent as it appears in a `torrent-get` reply.
pub(crate) fn make_test_torrent_json(name: &str, hash: &str) -> Value {
    json!({
        "hashString": hash,
        "name": name,
        "sizeWhenDone": 1000,
        "status": 4,
        "rateDownload": 100,
        "rateUpload": 0,
        "uploadedEver": 0,
        "files": [{"name": name, "length": 1000, "bytesCompleted": 500}],
        "errorString": ""
    })
}

/// A successful daemon reply wrapping `arguments`.
pub(crate) fn success(arguments: Value) -> Value {
    json!({"result": "success", "arguments": arguments})
}

pub(crate) fn ok(body: Value) -> HttpResponse {
    HttpResponse::new(StatusCode::OK, body.to_string())
}

pub(crate) fn conflict(session_id: &'static str) -> HttpResponse {
    let mut response = HttpResponse::new(StatusCode::CONFLICT, "");
    response
        .headers
        .insert(SESSION_ID_HEADER, HeaderValue::from_static(session_id));
    response
}
