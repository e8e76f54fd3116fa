use crate::state::{NestedRouter, State};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use std::sync::Arc;

mod add;
mod comment;
mod delete;
mod generate;
mod list;
mod publish;

pub fn route(state: Arc<State>) -> NestedRouter {
    let admin_only = axum::Router::new()
        .route(
            "/add",
            post(add::post).layer(DefaultBodyLimit::max(crate::blog::MAX_IMAGE_BYTES)),
        )
        .route("/delete", post(delete::post))
        .route("/toggle-publish", post(publish::post))
        .route("/generate", post(generate::post))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            super::gate::require_admin,
        ));

    axum::Router::new()
        .route("/all", get(list::all))
        .route("/:id", get(list::get))
        .route("/add-comment", post(comment::post))
        .route("/comments/:blog_id", get(comment::get))
        .merge(admin_only)
}
