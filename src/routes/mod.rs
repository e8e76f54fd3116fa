use crate::state::{NestedRouter, State};
use axum::routing::get;
use std::sync::Arc;

mod admin;
mod blog;
mod gate;
mod media;
pub mod response;

#[derive(Debug, serde::Deserialize)]
pub(crate) struct IdRequest {
    #[serde(default)]
    pub id: Option<String>,
}

pub fn route(state: Arc<State>) -> NestedRouter {
    axum::Router::new()
        .route("/", get(|| async { "API is Working" }))
        .nest("/blog", blog::route(state.clone()))
        .nest("/admin", admin::route(state))
        .nest("/media", media::route())
}

/// `None` for absent or blank form values.
pub(crate) fn required(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
