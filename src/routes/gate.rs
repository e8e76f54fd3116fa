use crate::error::BlogError;
use crate::state::SharedState;
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;

/// Lets a request through only if it carries a live admin session token,
/// either bare or as `Bearer <token>` in the `Authorization` header.
pub(super) async fn require_admin(
    State(state): SharedState,
    request: Request,
    next: Next,
) -> Result<Response, BlogError> {
    let Some(token) = session_token(request.headers()) else {
        return Err(BlogError::Unauthorized);
    };
    let Some(admin) = state.sessions.admin_for(&token).await else {
        return Err(BlogError::Unauthorized);
    };

    tracing::debug!("admin request from {admin}");
    Ok(next.run(request).await)
}

fn session_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim_start();
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();

    (!token.is_empty()).then(|| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::session_token;
    use axum::http::{header, HeaderMap, HeaderValue};

    fn headers(authorization: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(authorization));
        headers
    }

    #[test]
    fn reads_bare_and_bearer_tokens() {
        assert_eq!(session_token(&headers("abc123")).as_deref(), Some("abc123"));
        assert_eq!(
            session_token(&headers("Bearer abc123")).as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn missing_or_empty_token() {
        assert_eq!(session_token(&HeaderMap::new()), None);
        assert_eq!(session_token(&headers("Bearer ")), None);
    }
}
