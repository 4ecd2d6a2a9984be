//! Clients talking to a mocked Transmission endpoint over real HTTP.

#![allow(unused_crate_dependencies)]
#![allow(missing_docs)]

use mosaic_transmission_rpc::{
    BlockingTorrentClient, ClientError, ClientFactory, DEFAULT_FIELDS, TorrentClient,
    TorrentStatus, TransmissionConfig,
};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RPC_PATH: &str = "/transmission/rpc";
const SESSION_ID: &str = "abc123";

fn config(server: &MockServer) -> TransmissionConfig {
    TransmissionConfig::new(&format!("{}{RPC_PATH}", server.uri())).unwrap()
}

fn success(arguments: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"result": "success", "arguments": arguments}))
}

fn handshake() -> ResponseTemplate {
    ResponseTemplate::new(409).insert_header("X-Transmission-Session-Id", SESSION_ID)
}

fn torrent_json(id: i64, name: &str, hash: &str) -> Value {
    json!({
        "id": id,
        "hashString": hash,
        "name": name,
        "sizeWhenDone": 2000,
        "status": 6,
        "rateDownload": 0,
        "rateUpload": 42,
        "uploadedEver": 4000,
        "files": [{"name": name, "length": 2000, "bytesCompleted": 2000}],
        "errorString": ""
    })
}

/// Requests carrying the session id get `response`; anything else is asked to handshake.
async fn mount_daemon(server: &MockServer, response: ResponseTemplate, calls: u64) {
    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(header("X-Transmission-Session-Id", SESSION_ID))
        .respond_with(response)
        .with_priority(1)
        .expect(calls)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .respond_with(handshake())
        .expect(1)
        .mount(server)
        .await;
}

#[test_log::test(tokio::test)]
async fn test_handshake_then_list_torrents() {
    let server = MockServer::start().await;
    let torrents = json!({"torrents": [torrent_json(1, "ubuntu.iso", "deadbeef")]});
    mount_daemon(&server, success(torrents), 1).await;

    let client = ClientFactory::nonblocking_adapter(&config(&server)).unwrap();
    let torrents = client.torrents(&[]).await.unwrap();

    assert_eq!(torrents.len(), 1);
    assert_eq!(torrents[0].hash_string, "deadbeef");
    assert_eq!(torrents[0].status, TorrentStatus::Seeding);
    assert_eq!(torrents[0].percent_done(), 1.0);
}

#[test_log::test(tokio::test)]
async fn test_request_carries_method_fields_and_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(header("content-type", "application/json; charset=utf-8"))
        .and(body_partial_json(json!({
            "method": "torrent-get",
            "arguments": {"fields": DEFAULT_FIELDS, "ids": [7, "cafe"]}
        })))
        .respond_with(success(json!({"torrents": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ClientFactory::nonblocking(&config(&server)).unwrap();
    let reply = client
        .get_torrents(&[7_i64.into(), "cafe".into()])
        .await
        .unwrap();

    assert_eq!(reply["result"], "success");
}

#[test_log::test(tokio::test)]
async fn test_session_id_is_reused() {
    let server = MockServer::start().await;
    mount_daemon(&server, success(json!({"torrents": []})), 2).await;

    let client = ClientFactory::nonblocking(&config(&server)).unwrap();
    let first = client.get_torrents(&[]).await.unwrap();
    let second = client.get_torrents(&[]).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        client.transport().session().session_id().unwrap(),
        SESSION_ID
    );
}

#[test_log::test(tokio::test)]
async fn test_second_conflict_is_final() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(handshake())
        .expect(2)
        .mount(&server)
        .await;

    let client = ClientFactory::nonblocking(&config(&server)).unwrap();
    match client.get_torrents(&[]).await {
        Err(ClientError::UnexpectedStatus {
            method,
            status,
            reason,
        }) => {
            assert_eq!(method, "torrent-get");
            assert_eq!(status, 409);
            assert_eq!(reason, "Conflict");
        }
        other => panic!("Expected UnexpectedStatus, got {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn test_conflict_without_session_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(409))
        .expect(1)
        .mount(&server)
        .await;

    let client = ClientFactory::nonblocking(&config(&server)).unwrap();
    let result = client.get_torrents(&[]).await;

    assert!(matches!(result, Err(ClientError::MissingSessionId)));
}

#[test_log::test(tokio::test)]
async fn test_server_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = ClientFactory::nonblocking(&config(&server)).unwrap();
    match client.add_torrent("/tmp/a.torrent").await {
        Err(ClientError::UnexpectedStatus { status, reason, .. }) => {
            assert_eq!(status, 500);
            assert_eq!(reason, "Internal Server Error");
        }
        other => panic!("Expected UnexpectedStatus, got {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn test_non_json_reply_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ClientFactory::nonblocking(&config(&server)).unwrap();
    match client.get_torrents(&[]).await {
        Err(ClientError::MalformedResponse { method, body, .. }) => {
            assert_eq!(method, "torrent-get");
            assert_eq!(body, "<html>oops</html>");
        }
        other => panic!("Expected MalformedResponse, got {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn test_torrent_lifecycle() {
    let server = MockServer::start().await;
    Mock::given(body_partial_json(json!({
        "method": "torrent-add",
        "arguments": {"filename": "/tmp/ubuntu.torrent"}
    })))
    .respond_with(success(json!({
        "torrent-added": {"id": 1, "name": "ubuntu.iso", "hashString": "deadbeef"}
    })))
    .expect(1)
    .mount(&server)
    .await;
    for rpc in ["torrent-start", "torrent-stop", "torrent-remove"] {
        Mock::given(body_partial_json(
            json!({"method": rpc, "arguments": {"ids": "deadbeef"}}),
        ))
        .respond_with(success(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    }

    let client = ClientFactory::nonblocking_adapter(&config(&server)).unwrap();
    let torrent = client.add("/tmp/ubuntu.torrent").await.unwrap();
    assert_eq!(torrent.id, Some(1));

    client.start(&torrent).await.unwrap();
    client.pause(&torrent).await.unwrap();
    client.delete(torrent).await.unwrap();
}

#[test_log::test(tokio::test)]
async fn test_daemon_failure_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "invalid or corrupt torrent file",
            "arguments": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ClientFactory::nonblocking_adapter(&config(&server)).unwrap();
    match client.add("/tmp/broken.torrent").await {
        Err(ClientError::Daemon(msg)) => assert_eq!(msg, "invalid or corrupt torrent file"),
        other => panic!("Expected Daemon error, got {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn test_call_by_name() {
    let server = MockServer::start().await;
    Mock::given(body_partial_json(
        json!({"method": "torrent-stop", "arguments": {"ids": 3}}),
    ))
    .respond_with(success(json!({})))
    .expect(1)
    .mount(&server)
    .await;

    let client = ClientFactory::nonblocking_adapter(&config(&server)).unwrap();
    let reply = client.call("pause_torrent", vec![json!(3)]).await.unwrap();
    assert_eq!(reply["result"], "success");

    let err = client.call("reannounce", vec![json!(3)]).await.unwrap_err();
    assert!(matches!(err, ClientError::UndefinedOperation { .. }));
}

#[test_log::test(tokio::test)]
async fn test_unreachable_daemon() {
    let config = TransmissionConfig::new("http://127.0.0.1:9/transmission/rpc").unwrap();
    let client = ClientFactory::nonblocking(&config).unwrap();

    let result = client.get_torrents(&[]).await;

    assert!(matches!(result, Err(ClientError::Transport { .. })));
}

#[test_log::test]
fn test_blocking_handshake_with_credentials() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Basic dXNlcjpwYXNz"))
            .and(header("X-Transmission-Session-Id", SESSION_ID))
            .respond_with(success(json!({
                "torrents": [torrent_json(1, "a", "aaaa"), torrent_json(2, "b", "bbbb")]
            })))
            .with_priority(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(header("authorization", "Basic dXNlcjpwYXNz"))
            .respond_with(handshake())
            .expect(1)
            .mount(&server)
            .await;
        server
    });

    let config = config(&server).with_credentials("user", "pass");
    let client = ClientFactory::blocking_adapter(&config).unwrap();
    let torrents = client.torrents(&[]).unwrap();

    assert_eq!(torrents.len(), 2);
    assert_eq!(torrents[1].name, "b");

    runtime.block_on(server.verify());
}

#[test_log::test]
fn test_blocking_invalid_argument_sends_nothing() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(success(json!({})))
            .expect(0)
            .mount(&server)
            .await;
        server
    });

    let client = ClientFactory::blocking(&config(&server)).unwrap();

    assert!(matches!(
        client.add_torrent(""),
        Err(ClientError::InvalidArgument(_))
    ));
    assert!(matches!(
        client.start_torrent("".into()),
        Err(ClientError::InvalidArgument(_))
    ));

    runtime.block_on(server.verify());
}
