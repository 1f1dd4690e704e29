//! Outbound side of the notes manager.

use super::{
    config::{Config, COLLECTION},
    errors::ClientError,
    relay,
};
use async_trait::async_trait;
use axum::{
    body::Bytes,
    http::{header::CONTENT_TYPE, Method},
};
use serde_json::Value;
use std::sync::Arc;

/// One call against the notes service. `path` is relative to the transport's
/// root, e.g. `/notes/update/7`.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        ApiRequest {
            method,
            path: path.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Whatever carries manager requests to the notes service. Implementations
/// hand back the parsed JSON body no matter the HTTP status; only transport
/// and decoding problems are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError>;
}

#[derive(Clone, Debug)]
pub struct HttpTransport {
    http: reqwest::Client,
    root: String,
}

impl HttpTransport {
    /// `root` is either the notes service API root or this server's own
    /// `/api`, in which case requests go through the relay.
    pub fn new(http: reqwest::Client, root: impl Into<String>) -> Self {
        HttpTransport {
            http,
            root: root.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.root, request.path);
        let mut builder = self.http.request(request.method, url);
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(body)?);
        }

        let bytes = builder.send().await?.bytes().await?;

        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Sends manager requests the way the relay would forward them, without a
/// round trip through this server's own HTTP listener. A request without a
/// body goes upstream the way a bodiless browser call through the relay
/// does.
#[derive(Clone, Debug)]
pub struct RelayTransport {
    http: reqwest::Client,
    config: Arc<Config>,
}

impl RelayTransport {
    pub fn new(http: reqwest::Client, config: Arc<Config>) -> Self {
        RelayTransport { http, config }
    }

    /// `/notes` maps to the relay base, `/notes/<rest>` to a sub-path of it.
    fn url(&self, path: &str) -> String {
        let base = self.config.relay_base();
        let rest = path
            .strip_prefix(&format!("/{COLLECTION}"))
            .unwrap_or(path)
            .trim_start_matches('/');
        if rest.is_empty() {
            base
        } else {
            relay::upstream_url(&base, &relay::segments(rest))
        }
    }
}

#[async_trait]
impl Transport for RelayTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let url = self.url(&request.path);
        let body = request
            .body
            .unwrap_or_else(|| relay::inbound_body(None, &Bytes::new()));
        let (_, data) = relay::forward(
            &self.http,
            &url,
            request.method,
            &body,
            self.config.upstream_timeout,
        )
        .await
        .map_err(ClientError::Relay)?;

        Ok(data)
    }
}
