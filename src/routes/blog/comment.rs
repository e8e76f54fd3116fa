use crate::blog::{Comment, NewComment};
use crate::error::BlogError;
use crate::routes::required;
use crate::routes::response::{self, Reply};
use crate::state::SharedState;
use crate::store::CommentFilter;
use axum::extract::{Path, State};
use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(super) struct AddCommentRequest {
    #[serde(default)]
    blog: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct CommentsData {
    comments: Vec<Comment>,
}

/// New comments wait for an admin to approve them. The blog id is not checked
/// against existing blogs.
pub(super) async fn post(
    State(state): SharedState,
    body: Result<Json<AddCommentRequest>, JsonRejection>,
) -> Reply {
    let Json(request) = body?;
    let (Some(blog), Some(name), Some(content)) = (
        required(request.blog),
        required(request.name),
        required(request.content),
    ) else {
        return Err(BlogError::MissingFields);
    };

    let comment = state
        .store
        .create_comment(NewComment {
            blog,
            name,
            content,
        })
        .await?;

    tracing::info!("Comment {} on blog {} awaits review", comment.id, comment.blog);
    Ok(response::done("Comment added for review"))
}

/// Approved comments of one blog, newest first.
pub(super) async fn get(
    State(state): SharedState,
    Path(blog_id): Path<String>,
) -> Reply<CommentsData> {
    if crate::blog::is_placeholder_id(&blog_id) {
        return Err(BlogError::InvalidBlogId);
    }

    let mut comments = state
        .store
        .find_comments(CommentFilter::for_blog(blog_id).approved())
        .await
        .map_err(BlogError::from_blog_lookup)?;
    crate::blog::sort_newest_first(&mut comments, |comment| comment.created_at);

    Ok(response::ok(CommentsData { comments }))
}
