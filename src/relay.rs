//! Same-origin forwarding onto the notes service.
//!
//! The relay does not look at what it forwards: whatever JSON the caller
//! sent goes upstream with the same method, and whatever JSON comes back is
//! returned with the upstream status. A JSON body is sent for every method,
//! GET and DELETE included.

use anyhow::Result;
use axum::{
    body::Bytes,
    http::{header::CONTENT_TYPE, Method, StatusCode},
};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// `base + "/" + segments.join("/")`. The base is used verbatim.
pub fn upstream_url(base: &str, segments: &[&str]) -> String {
    format!("{}/{}", base, segments.join("/"))
}

/// Split a captured wildcard path into its segments.
pub fn segments(path: &str) -> Vec<&str> {
    path.trim_start_matches('/').split('/').collect()
}

/// Decode the inbound body into the value that gets re-serialized for the
/// upstream call. Only a JSON content type is parsed, with an empty body
/// reading as `{}`. Anything else, an absent body included, is carried as a
/// JSON string of its text.
pub fn inbound_body(content_type: Option<&str>, body: &Bytes) -> Value {
    let text = || Value::String(String::from_utf8_lossy(body).into_owned());
    let is_json =
        content_type.map_or(false, |ct| ct.starts_with("application/json"));
    if !is_json {
        return text();
    }
    if body.is_empty() {
        return Value::Object(Default::default());
    }
    serde_json::from_slice(body).unwrap_or_else(|_| text())
}

pub async fn forward(
    http: &reqwest::Client,
    url: &str,
    method: Method,
    body: &Value,
    timeout: Option<Duration>,
) -> Result<(StatusCode, Value)> {
    debug!(%method, url, "forwarding");
    let mut request = http
        .request(method, url)
        .header(CONTENT_TYPE, "application/json")
        .body(serde_json::to_vec(body)?);
    if let Some(timeout) = timeout {
        request = request.timeout(timeout);
    }

    let response = request.send().await?;
    let status = response.status();
    let bytes = response.bytes().await?;
    let data = serde_json::from_slice(&bytes)?;

    Ok((status, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_upstream::FakeUpstream;
    use serde_json::json;

    #[test]
    fn test_upstream_url_joins_segments() {
        let base = "https://service.example/api/notes";
        assert_eq!(
            upstream_url(base, &["update", "7"]),
            "https://service.example/api/notes/update/7"
        );
        assert_eq!(
            upstream_url(base, &["delete", "42"]),
            "https://service.example/api/notes/delete/42"
        );
        assert_eq!(upstream_url(base, &["a"]), format!("{base}/a"));
        assert_eq!(upstream_url(base, &[]), format!("{base}/"));
    }

    #[test]
    fn test_segments() {
        assert_eq!(segments("update/7"), vec!["update", "7"]);
        assert_eq!(segments("/delete/42"), vec!["delete", "42"]);
        assert_eq!(segments("x"), vec!["x"]);
    }

    #[test]
    fn test_inbound_body() {
        let json_type = Some("application/json; charset=utf-8");
        assert_eq!(inbound_body(json_type, &Bytes::new()), json!({}));
        assert_eq!(
            inbound_body(json_type, &Bytes::from_static(br#"{"title":"X"}"#)),
            json!({ "title": "X" })
        );
        assert_eq!(
            inbound_body(json_type, &Bytes::from_static(b"not json")),
            json!("not json")
        );

        assert_eq!(inbound_body(None, &Bytes::new()), json!(""));
        assert_eq!(
            inbound_body(Some("text/plain"), &Bytes::from_static(b"[1]")),
            json!("[1]")
        );
    }

    #[tokio::test]
    async fn test_forward_sends_method_header_and_body() {
        let upstream = FakeUpstream::spawn(StatusCode::OK, r#"{"success":true}"#);
        let url = format!("{}/notes/update/7", upstream.root());

        let (status, data) = forward(
            &reqwest::Client::new(),
            &url,
            Method::PATCH,
            &json!({ "title": "A" }),
            None,
        )
        .await
        .expect("forwarded");

        assert_eq!(status, StatusCode::OK);
        assert_eq!(data, json!({ "success": true }));

        let seen = upstream.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, Method::PATCH);
        assert_eq!(seen[0].path, "/api/notes/update/7");
        assert_eq!(seen[0].content_type.as_deref(), Some("application/json"));
        assert_eq!(seen[0].json(), json!({ "title": "A" }));
    }

    #[tokio::test]
    async fn test_forward_rejects_non_json_reply() {
        let upstream = FakeUpstream::spawn(StatusCode::OK, "<html>oops</html>");
        let url = format!("{}/notes", upstream.root());

        let result = forward(
            &reqwest::Client::new(),
            &url,
            Method::GET,
            &Value::Null,
            None,
        )
        .await;

        assert!(result.is_err());
    }
}
