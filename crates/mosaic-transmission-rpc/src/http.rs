//! HTTP send primitives the transports are built on.
//!
//! [`HttpSend`] and [`AsyncHttpSend`] are implemented for the `reqwest` blocking and
//! async clients; other connection mechanisms (or mocks) can be plugged in by
//! implementing them.

use mosaic_torrent_types::ClientError;
use reqwest::{StatusCode, header::HeaderMap};
use url::Url;

/// A POST to the RPC endpoint.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// RPC endpoint.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// Serialized JSON body.
    pub body: String,
}

/// What came back from the daemon.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw body.
    pub body: String,
}

impl HttpResponse {
    /// A response with no headers.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Reason phrase of the status, empty for non-standard codes.
    pub fn reason(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or_default()
    }
}

/// Blocking HTTP send.
#[cfg_attr(test, mockall::automock)]
pub trait HttpSend {
    /// Send `request` and wait for the full response.
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError>;
}

/// Non-blocking HTTP send.
#[cfg_attr(test, mockall::automock)]
#[allow(async_fn_in_trait)]
pub trait AsyncHttpSend {
    /// Send `request`; resolves once the full response has been read.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError>;
}

impl HttpSend for reqwest::blocking::Client {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let response = self
            .post(request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().map_err(transport_error)?;
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl AsyncHttpSend for reqwest::Client {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let response = self
            .post(request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(transport_error)?;
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

pub(crate) fn transport_error(err: reqwest::Error) -> ClientError {
    ClientError::Transport {
        status: err.status().map(|s| s.as_u16()),
        source: Box::new(err),
    }
}
