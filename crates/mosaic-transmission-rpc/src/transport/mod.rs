//! Transports executing the Transmission session handshake.
//!
//! The daemon rejects any request without a current session id with `409 Conflict`,
//! handing out the id to use in the `X-Transmission-Session-Id` response header. A
//! call therefore goes out once, and at most once more with the refreshed id:
//!
//! 1. send the body with the last known session id (none on the first call);
//! 2. on 409, store the id from the response header and resend the same body;
//! 3. anything but 200 at this point is final, a second 409 included;
//! 4. the 200 body must be JSON and is returned as is.
//!
//! The inspection steps are shared here; [`BlockingTransport`] and [`AsyncTransport`]
//! only differ in how they wait on the network.

use mosaic_torrent_types::ClientError;
use reqwest::{StatusCode, header::HeaderValue};
use serde_json::Value;
use tracing::warn;
use url::Url;

use crate::http::{HttpRequest, HttpResponse};
use crate::request::RpcMethod;
use crate::session::{SESSION_ID_HEADER, SessionStore};

mod blocking;
mod nonblocking;

pub use blocking::BlockingTransport;
pub use nonblocking::AsyncTransport;

/// RPC endpoint plus the session state used to talk to it.
#[derive(Debug)]
pub(crate) struct Endpoint {
    url: Url,
    session: SessionStore,
}

impl Endpoint {
    pub(crate) fn new(url: Url, session: SessionStore) -> Self {
        Self { url, session }
    }

    pub(crate) fn url(&self) -> &Url {
        &self.url
    }

    pub(crate) fn session(&self) -> &SessionStore {
        &self.session
    }

    /// A request for `body` carrying the current session headers.
    pub(crate) fn request(&self, body: &str) -> HttpRequest {
        HttpRequest {
            url: self.url.clone(),
            headers: self.session.headers(),
            body: body.to_owned(),
        }
    }
}

/// Outcome of looking at the first response of a call.
#[derive(Debug)]
pub(crate) enum Handshake {
    /// No handshake needed, validate this response.
    Complete(HttpResponse),
    /// The daemon issued a new session id; resend with it.
    Retry(HeaderValue),
}

pub(crate) fn inspect(response: HttpResponse) -> Result<Handshake, ClientError> {
    if response.status != StatusCode::CONFLICT {
        return Ok(Handshake::Complete(response));
    }

    match response.headers.get(SESSION_ID_HEADER) {
        Some(session_id) => Ok(Handshake::Retry(session_id.clone())),
        None => {
            warn!("Daemon answered 409 without a session id header");
            Err(ClientError::MissingSessionId)
        }
    }
}

/// Check the final response of a call and decode its body.
pub(crate) fn decode(method: RpcMethod, response: HttpResponse) -> Result<Value, ClientError> {
    if response.status != StatusCode::OK {
        warn!(%method, status = %response.status, "Unexpected RPC response status");
        return Err(ClientError::UnexpectedStatus {
            method: method.to_string(),
            status: response.status.as_u16(),
            reason: response.reason().to_owned(),
        });
    }

    match serde_json::from_str(&response.body) {
        Ok(value) => Ok(value),
        Err(source) => Err(ClientError::MalformedResponse {
            method: method.to_string(),
            source,
            body: response.body,
        }),
    }
}
