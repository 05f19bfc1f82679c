//! The HTTP seam every client sends through.
//!
//! Clients build an [`HttpRequest`], hand it to an [`HttpTransport`] and
//! interpret the returned [`HttpResponse`] themselves; the transport only
//! moves bytes. [`ReqwestTransport`] is the production implementation and
//! `MockHttpTransport` is generated for tests.

use async_trait::async_trait;
use mockall::automock;
use serde::de::DeserializeOwned;
use std::fmt;

use crate::error::{RelayError, RelayResult};

/// A POST request with a fully encoded body.
#[derive(Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub basic_auth: Option<(String, String)>,
}

impl HttpRequest {
    pub fn post(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body,
            basic_auth: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth = Some((username.into(), password.into()));
        self
    }

    /// Looks a header up by case-insensitive name.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("body", &String::from_utf8_lossy(&self.body))
            .field(
                "basic_auth",
                &self.basic_auth.as_ref().map(|(user, _)| (user, "<redacted>")),
            )
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Converts a response whose status fails `accept` into [`RelayError::Http`],
    /// keeping the raw body.
    pub fn check_status(self, accept: impl Fn(u16) -> bool) -> RelayResult<Self> {
        if accept(self.status) {
            Ok(self)
        } else {
            Err(RelayError::Http {
                status: self.status,
                body: self.text(),
            })
        }
    }

    /// Decodes the body, keeping the raw bytes on failure.
    pub fn json<T: DeserializeOwned>(&self) -> RelayResult<T> {
        serde_json::from_slice(&self.body).map_err(|source| RelayError::Decode {
            body: self.body.clone(),
            source,
        })
    }
}

#[automock]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends one POST and waits for the complete response.
    ///
    /// Any status code is a successful exchange here; only connection-level
    /// failures are errors, reported as [`RelayError::Transport`].
    async fn post(&self, request: HttpRequest) -> RelayResult<HttpResponse>;
}

/// [`HttpTransport`] over a `reqwest` client.
///
/// No timeout is configured. The underlying connection is released when the
/// transport is dropped.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, request: HttpRequest) -> RelayResult<HttpResponse> {
        let mut builder = self.client.post(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some((username, password)) = &request.basic_auth {
            builder = builder.basic_auth(username, Some(password));
        }

        tracing::debug!(url = %request.url, bytes = request.body.len(), "sending POST");

        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(RelayError::transport)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(RelayError::transport)?.to_vec();

        tracing::debug!(url = %request.url, status, bytes = body.len(), "received response");

        Ok(HttpResponse { status, body })
    }
}
