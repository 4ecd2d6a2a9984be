use mosaic_torrent_types::ClientError;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use super::{Endpoint, Handshake, decode, inspect};
use crate::http::AsyncHttpSend;
use crate::request::{RpcMethod, build_body};
use crate::session::SessionStore;

/// Transport whose calls suspend on network I/O instead of blocking.
///
/// Each call keeps its own request body, so overlapping calls on one transport do not
/// interfere with each other beyond sharing the session id.
#[derive(Debug)]
pub struct AsyncTransport<H = reqwest::Client> {
    http: H,
    endpoint: Endpoint,
}

impl<H: AsyncHttpSend> AsyncTransport<H> {
    /// Create a transport posting to `url` through `http`.
    pub fn new(http: H, url: Url, session: SessionStore) -> Self {
        Self {
            http,
            endpoint: Endpoint::new(url, session),
        }
    }

    /// RPC endpoint.
    pub fn url(&self) -> &Url {
        self.endpoint.url()
    }

    /// Session state shared by every call made through this transport.
    pub fn session(&self) -> &SessionStore {
        self.endpoint.session()
    }

    /// Call `method` and return the decoded JSON reply.
    ///
    /// The resend, if any, is only issued once the first response has been inspected.
    pub async fn perform_rpc_request(
        &self,
        method: RpcMethod,
        arguments: Map<String, Value>,
    ) -> Result<Value, ClientError> {
        let body = build_body(method, arguments)?;

        debug!(%method, url = %self.endpoint.url(), "Sending RPC request");
        let response = self.http.send(self.endpoint.request(&body)).await?;
        let response = match inspect(response)? {
            Handshake::Complete(response) => response,
            Handshake::Retry(session_id) => {
                debug!(%method, "Session id refreshed, resending");
                self.endpoint.session().set_session_id(session_id);
                self.http.send(self.endpoint.request(&body)).await?
            }
        };

        decode(method, response)
    }
}
