use crate::state::{NestedRouter, State};
use axum::routing::{get, post};
use std::sync::Arc;

mod blogs;
mod comments;
mod dashboard;
mod login;

pub fn route(state: Arc<State>) -> NestedRouter {
    let admin_only = axum::Router::new()
        .route("/comments", get(comments::get))
        .route("/blogs", get(blogs::get))
        .route("/dashboard", get(dashboard::get))
        .route("/delete-comment", post(comments::delete))
        .route("/approved-comment", post(comments::approve))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            super::gate::require_admin,
        ));

    axum::Router::new()
        .route("/login", post(login::post))
        .merge(admin_only)
}
