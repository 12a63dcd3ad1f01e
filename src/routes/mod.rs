pub mod accounts;
pub mod assets;
pub mod posts;
pub mod uploads;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router: API surface, upload serving, embedded
/// front-end, request tracing, and the wide-open CORS the original
/// backend ships with.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(assets::index))
        .route("/assets/{*path}", get(assets::serve))
        .merge(accounts::router())
        .merge(posts::router())
        .merge(uploads::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
