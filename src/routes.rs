use super::{controllers, middleware, models};
use axum::{
    middleware::from_fn,
    routing::{any, get, Router},
};

#[rustfmt::skip]
pub fn get_routes() -> Router<models::AppState> {
    let pages = Router::new()
        .route("/notes", get(controllers::notes_page))
        .layer(from_fn(middleware::html_headers));

    Router::new()
        .route("/api/notes", any(controllers::relay_collection))
        .route("/api/notes/*path", any(controllers::relay_path))
        .merge(pages)
}
