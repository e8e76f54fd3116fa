use crate::state::{NestedRouter, SharedState};
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio_util::io::ReaderStream;

pub fn route() -> NestedRouter {
    let image_compression_layer = tower_http::compression::CompressionLayer::new()
        .br(true)
        .quality(tower_http::CompressionLevel::Best);

    axum::Router::new().route("/*path", get(get_file).layer(image_compression_layer))
}

/// Serves images kept by the local media backend.
async fn get_file(State(state): SharedState, Path(path): Path<String>) -> Result<Response, StatusCode> {
    let Some(file_path) = state.media.local_path(&path) else {
        return Err(StatusCode::NOT_FOUND);
    };

    let file = match tokio::fs::File::open(&file_path).await {
        Ok(it) => it,
        Err(err) => {
            if err.kind() == std::io::ErrorKind::NotFound {
                return Err(StatusCode::NOT_FOUND);
            }
            tracing::error!("Error reading image {file_path:?}: {err}");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };
    let body = Body::from_stream(ReaderStream::new(file));

    if let Some(mime_guess) = new_mime_guess::from_path(&file_path).first() {
        Ok(([("Content-Type", mime_guess.to_string())], body).into_response())
    } else {
        Ok(body.into_response())
    }
}
