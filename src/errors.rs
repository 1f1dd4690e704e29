use anyhow::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Any failure while relaying a request. The cause is logged, and the
/// caller only ever sees a generic 500.
#[derive(Debug)]
pub struct RelayError(Error);

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        error!("relay failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal Server Error" })),
        )
            .into_response()
    }
}

// This enables using `?` on functions that return `Result<_, anyhow::Error>`
// to turn them into `Result<_, RelayError>`.
impl<E> From<E> for RelayError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Failures talking to the notes service from the manager side.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("response was not JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("relay failed: {0:#}")]
    Relay(anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[tokio::test]
    async fn test_relay_error_hides_cause() {
        let err = RelayError::from(anyhow::anyhow!("connection refused"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = hyper::body::to_bytes(response.into_body())
            .await
            .expect("body");
        let body: Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(body, json!({ "error": "Internal Server Error" }));
    }
}
