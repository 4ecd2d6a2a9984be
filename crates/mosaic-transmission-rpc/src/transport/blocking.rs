use mosaic_torrent_types::ClientError;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use super::{Endpoint, Handshake, decode, inspect};
use crate::http::HttpSend;
use crate::request::{RpcMethod, build_body};
use crate::session::SessionStore;

/// Transport that blocks the calling thread for the whole handshake.
#[derive(Debug)]
pub struct BlockingTransport<H = reqwest::blocking::Client> {
    http: H,
    endpoint: Endpoint,
}

impl<H: HttpSend> BlockingTransport<H> {
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
    pub fn perform_rpc_request(
        &self,
        method: RpcMethod,
        arguments: Map<String, Value>,
    ) -> Result<Value, ClientError> {
        let body = build_body(method, arguments)?;

        debug!(%method, url = %self.endpoint.url(), "Sending RPC request");
        let response = self.http.send(self.endpoint.request(&body))?;
        let response = match inspect(response)? {
            Handshake::Complete(response) => response,
            Handshake::Retry(session_id) => {
                debug!(%method, "Session id refreshed, resending");
                self.endpoint.session().set_session_id(session_id);
                self.http.send(self.endpoint.request(&body))?
            }
        };

        decode(method, response)
    }
}
