use crate::error::BlogError;
use crate::routes::required;
use crate::routes::response::{self, Reply};
use crate::state::SharedState;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(super) struct GenerateRequest {
    #[serde(default)]
    prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct ContentData {
    content: String,
}

pub(super) async fn post(
    State(state): SharedState,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Reply<ContentData> {
    let Json(request) = body?;
    let Some(topic) = required(request.prompt) else {
        return Err(BlogError::MissingFields);
    };

    let content = state
        .writer
        .generate(&crate::generate::blog_prompt(&topic))
        .await?;

    Ok(response::ok(ContentData { content }))
}
