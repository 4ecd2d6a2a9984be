//! Per-transport session state: the daemon-issued session id and basic auth.

use std::sync::{PoisonError, RwLock};

use base64::{Engine, engine::general_purpose::STANDARD};
use mosaic_torrent_types::ClientError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

/// Header carrying the daemon's anti-CSRF session id.
pub const SESSION_ID_HEADER: HeaderName = HeaderName::from_static("x-transmission-session-id");

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Holds the session id and credentials for one transport.
///
/// The session id starts out unset and is replaced whenever the daemon hands out a
/// new one. Overlapping calls may race to store it; the last writer wins, which is
/// fine because the id is daemon-wide and a stale one only costs another handshake.
#[derive(Debug, Default)]
pub struct SessionStore {
    authorization: Option<HeaderValue>,
    session_id: RwLock<Option<HeaderValue>>,
}

impl SessionStore {
    /// A store without credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store sending basic auth. A missing half of the pair is sent empty.
    pub fn with_credentials(
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, ClientError> {
        if username.is_none() && password.is_none() {
            return Ok(Self::new());
        }

        let encoded = STANDARD.encode(format!(
            "{}:{}",
            username.unwrap_or_default(),
            password.unwrap_or_default()
        ));
        let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
            .map_err(|e| ClientError::InvalidArgument(format!("invalid credentials: {e}")))?;
        value.set_sensitive(true);

        Ok(Self {
            authorization: Some(value),
            session_id: RwLock::default(),
        })
    }

    /// Last session id received from the daemon.
    pub fn session_id(&self) -> Option<HeaderValue> {
        self.session_id
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the session id.
    pub fn set_session_id(&self, session_id: HeaderValue) {
        *self
            .session_id
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(session_id);
    }

    /// Headers for the next request.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        if let Some(authorization) = &self.authorization {
            headers.insert(AUTHORIZATION, authorization.clone());
        }
        if let Some(session_id) = self.session_id() {
            headers.insert(SESSION_ID_HEADER, session_id);
        }
        headers
    }
}
