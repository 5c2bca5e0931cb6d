//! portage-server
//!
//! File-backed persistence endpoint for the patient collection. The whole
//! collection is read with `GET /api/children` and replaced with `PUT` (or
//! `POST`) on the same path.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};

use config::ServerConfig;
use state::AppState;

/// Upper bound on a replacement payload. The collection is sent whole.
const MAX_BODY_BYTES: usize = portage_storage::http::MAX_COLLECTION_BYTES as usize;

/// Build the application router for `state`.
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/api/children",
            get(routes::children::list_children)
                .put(routes::children::replace_children)
                .post(routes::children::replace_children),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state);

    if config.allow_any_origin {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router = router.layer(cors);
    }

    router
}
