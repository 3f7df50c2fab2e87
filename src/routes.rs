//! ==============================================================================
//! routes.rs - Router Composition
//! ==============================================================================
//!
//! purpose:
//!     wires the plain handler functions onto the two HTTP surfaces:
//!     - the REST surface: literals (/, /ping, /panic), the /rest/v1 API
//!       and the token-gated /admin subtree;
//!     - the status surface: GET /device only, served from its own
//!       listener.
//!
//! middleware:
//!     permissive CORS (local development clients run on other ports),
//!     request tracing, and a panic-recovery layer so a handler crash
//!     answers a plain 500 instead of tearing the connection down.
//!
//! ==============================================================================

use axum::{middleware, routing::get, Router};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::config::HubConfig;
use crate::handlers::{admin, articles, climate};
use crate::state::SharedState;

/// Build the main REST surface.
pub fn rest_router(config: &HubConfig, state: SharedState) -> Router {
    let admin_routes = Router::new()
        .route("/", get(admin::index))
        .route("/accounts", get(admin::accounts))
        .route("/users/:user_id", get(admin::user))
        .layer(middleware::from_fn_with_state(
            config.admin.clone(),
            admin::require_admin,
        ));

    let api = Router::new()
        .route("/", get(articles::list).post(articles::create))
        .route("/device", get(climate::device))
        .route("/time", get(climate::schedule).put(climate::update_schedule))
        .route("/temp", get(climate::temp).put(climate::update_temp))
        .route("/mode", get(climate::modes).put(climate::update_modes))
        // one dynamic segment serves both id and slug lookups; static
        // siblings above win the match
        .route(
            "/:key",
            get(articles::get)
                .put(articles::update)
                .delete(articles::remove),
        );

    Router::new()
        .route("/", get(root))
        .route("/ping", get(ping))
        .route("/panic", get(boom))
        .nest("/rest/v1", api)
        .nest("/admin", admin_routes)
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Build the device-status surface.
pub fn status_router(state: SharedState) -> Router {
    Router::new()
        .route("/device", get(climate::device))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    "root."
}

async fn ping() -> &'static str {
    "pong"
}

/// Crashes on purpose; exercises the panic-recovery layer.
async fn boom() -> &'static str {
    panic!("test")
}
