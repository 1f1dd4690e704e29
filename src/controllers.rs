use super::{
    client::RelayTransport,
    components::{self, Component},
    errors::RelayError,
    manager::NotesManager,
    models::AppState,
    relay,
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap, Method},
    response::IntoResponse,
    Json,
};

/// `ANY /api/notes/*path`
pub async fn relay_path(
    State(AppState { http, config }): State<AppState>,
    method: Method,
    Path(path): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, RelayError> {
    let url = relay::upstream_url(&config.relay_base(), &relay::segments(&path));
    let body = relay::inbound_body(content_type(&headers), &body);
    let (status, data) =
        relay::forward(&http, &url, method, &body, config.upstream_timeout)
            .await?;

    Ok((status, Json(data)))
}

/// `ANY /api/notes`, so the collection itself is reachable through the
/// relay, e.g. by an `HttpTransport` rooted at this server's `/api`.
pub async fn relay_collection(
    State(AppState { http, config }): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, RelayError> {
    let body = relay::inbound_body(content_type(&headers), &body);
    let (status, data) = relay::forward(
        &http,
        &config.relay_base(),
        method,
        &body,
        config.upstream_timeout,
    )
    .await?;

    Ok((status, Json(data)))
}

fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
}

pub async fn notes_page(
    State(AppState { http, config }): State<AppState>,
) -> impl IntoResponse {
    let mut manager = NotesManager::new(RelayTransport::new(http, config));
    manager.load().await;

    let page = components::Page {
        title: "Notes".to_string(),
        children: Box::new(components::NotesBoard { manager: &manager }),
    };
    page.render()
}
