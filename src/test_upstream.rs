//! A stand-in for the notes service: an axum server on an ephemeral port
//! that answers every request with one canned reply and records what it was
//! sent.

use axum::{
    body::Bytes,
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode, Uri},
    Router,
};
use serde_json::Value;
use std::{
    net::{SocketAddr, TcpListener},
    sync::{Arc, Mutex},
};

#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("recorded body is JSON")
    }
}

pub struct FakeUpstream {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeUpstream {
    /// Must be called from inside a tokio runtime.
    pub fn spawn(status: StatusCode, reply: &'static str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = requests.clone();
        let app = Router::new().fallback(
            move |method: Method, uri: Uri, headers: HeaderMap, body: Bytes| {
                let log = log.clone();
                async move {
                    log.lock().unwrap().push(Recorded {
                        method,
                        path: uri.path().to_string(),
                        content_type: headers
                            .get(CONTENT_TYPE)
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string),
                        body,
                    });
                    (status, [(CONTENT_TYPE, "application/json")], reply)
                }
            },
        );

        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let server = axum::Server::from_tcp(listener)
            .expect("server from listener")
            .serve(app.into_make_service());
        tokio::spawn(server);

        FakeUpstream { addr, requests }
    }

    /// API root, i.e. what `NOTES_UPSTREAM` would be set to.
    pub fn root(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

/// An API root nothing is listening on.
pub fn refused_root() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}/api")
}

/// An API root that accepts connections and never answers.
pub async fn hung_root() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{addr}/api")
}
