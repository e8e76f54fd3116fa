//! Handler errors and how each one shows up on the wire.
//!
//! Malformed ids, unknown records and failed authentication get their own
//! status code. Everything else, missing fields included, is reported with
//! `200 OK` and `success: false`; the envelope carries the real outcome.

use crate::auth::AuthError;
use crate::generate::GenerateError;
use crate::media::MediaError;
use crate::store::StoreError;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlogError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid Blog ID")]
    InvalidBlogId,

    #[error("Invalid Blog ID format")]
    MalformedBlogId,

    #[error("Blog Not Found")]
    BlogNotFound,

    #[error("Comment Not Found")]
    CommentNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl BlogError {
    pub fn status(&self) -> StatusCode {
        match self {
            BlogError::InvalidBlogId | BlogError::MalformedBlogId => StatusCode::BAD_REQUEST,
            BlogError::BlogNotFound | BlogError::CommentNotFound => StatusCode::NOT_FOUND,
            BlogError::InvalidCredentials | BlogError::Unauthorized => StatusCode::UNAUTHORIZED,
            BlogError::MissingFields
            | BlogError::InvalidRequest(_)
            | BlogError::Store(_)
            | BlogError::Media(_)
            | BlogError::Generate(_)
            | BlogError::Auth(_) => StatusCode::OK,
        }
    }

    /// Lookups by a client-supplied blog id report a malformed id as 400.
    pub fn from_blog_lookup(err: StoreError) -> BlogError {
        match err {
            StoreError::InvalidIdentifier(_) => BlogError::MalformedBlogId,
            err => BlogError::Store(err),
        }
    }
}

impl From<JsonRejection> for BlogError {
    fn from(rejection: JsonRejection) -> Self {
        BlogError::InvalidRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for BlogError {
    fn from(rejection: MultipartRejection) -> Self {
        BlogError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        match &self {
            BlogError::Store(_) | BlogError::Media(_) | BlogError::Generate(_) | BlogError::Auth(_) => {
                tracing::warn!(error = %self, "request failed");
            }
            _ => tracing::debug!(error = %self, "request rejected"),
        }

        (self.status(), crate::routes::response::failure(self.to_string())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert_eq!(BlogError::InvalidBlogId.status(), StatusCode::BAD_REQUEST);
        assert_eq!(BlogError::BlogNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(BlogError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(BlogError::MissingFields.status(), StatusCode::OK);
        assert_eq!(
            BlogError::Store(StoreError::TransientFailure("busy".into())).status(),
            StatusCode::OK
        );
    }

    #[test]
    fn only_blog_lookups_turn_cast_failures_into_400() {
        let err = BlogError::from_blog_lookup(StoreError::InvalidIdentifier("x".into()));
        assert!(matches!(err, BlogError::MalformedBlogId));

        let err: BlogError = StoreError::InvalidIdentifier("x".into()).into();
        assert_eq!(err.status(), StatusCode::OK);
        assert_eq!(err.to_string(), "invalid identifier \"x\"");
    }
}
