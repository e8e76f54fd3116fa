//! Blog content-management backend: blog and comment CRUD, an admin session
//! gate, image hosting for cover images and AI-assisted drafting.
//!
//! Routes live under [`routes`]; the document store, media host and text
//! generator are traits so the binary can plug in real backends and tests can
//! plug in fakes.

pub mod auth;
pub mod blog;
pub mod config;
pub mod error;
pub mod generate;
pub mod media;
pub mod routes;
pub mod state;
pub mod store;

use std::sync::Arc;
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

/// The routes with trailing slashes trimmed before routing.
pub type App = NormalizePath<axum::Router>;

/// The whole HTTP surface with state attached. `cors_origin` of `None` allows
/// any origin.
pub fn app(state: Arc<state::State>, cors_origin: Option<&str>) -> App {
    let cors = match cors_origin.and_then(|origin| axum::http::HeaderValue::from_str(origin).ok()) {
        Some(origin) => CorsLayer::new()
            .allow_origin(tower_http::cors::AllowOrigin::exact(origin))
            .allow_headers(tower_http::cors::Any)
            .allow_methods(tower_http::cors::Any),
        None => CorsLayer::permissive(),
    };

    let router = routes::route(state.clone())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
