use crate::blog::{Blog, BlogID, Comment, CommentID};
use crate::error::BlogError;
use crate::routes::response::{self, Reply};
use crate::routes::{required, IdRequest};
use crate::state::SharedState;
use crate::store::{BlogFilter, CommentFilter};
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Serialize;
use std::collections::HashMap;

/// A comment with its blog filled in; `blog` is `null` once the blog is gone.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CommentWithBlog {
    #[serde(rename = "_id")]
    id: CommentID,
    blog: Option<Blog>,
    name: String,
    content: String,
    is_approved: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub(super) struct CommentsData {
    comments: Vec<CommentWithBlog>,
}

impl CommentWithBlog {
    fn new(comment: Comment, blogs: &HashMap<BlogID, Blog>) -> CommentWithBlog {
        CommentWithBlog {
            blog: blogs.get(&comment.blog).cloned(),
            id: comment.id,
            name: comment.name,
            content: comment.content,
            is_approved: comment.is_approved,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// Every comment, approved or not, newest first.
pub(super) async fn get(State(state): SharedState) -> Reply<CommentsData> {
    let mut comments = state.store.find_comments(CommentFilter::all()).await?;
    crate::blog::sort_newest_first(&mut comments, |comment| comment.created_at);

    let blogs = state
        .store
        .find_blogs(BlogFilter::all())
        .await?
        .into_iter()
        .map(|blog| (blog.id.clone(), blog))
        .collect::<HashMap<_, _>>();

    Ok(response::ok(CommentsData {
        comments: comments
            .into_iter()
            .map(|comment| CommentWithBlog::new(comment, &blogs))
            .collect(),
    }))
}

pub(super) async fn delete(
    State(state): SharedState,
    body: Result<Json<IdRequest>, JsonRejection>,
) -> Reply {
    let Json(request) = body?;
    let Some(comment_id) = required(request.id) else {
        return Err(BlogError::MissingFields);
    };

    if state.store.delete_comment(&comment_id).await?.is_some() {
        tracing::info!("Deleted comment {comment_id}");
    }

    Ok(response::done("Comment deleted successfully"))
}

pub(super) async fn approve(
    State(state): SharedState,
    body: Result<Json<IdRequest>, JsonRejection>,
) -> Reply {
    let Json(request) = body?;
    let Some(comment_id) = required(request.id) else {
        return Err(BlogError::MissingFields);
    };

    let Some(mut comment) = state.store.find_comment(&comment_id).await? else {
        return Err(BlogError::CommentNotFound);
    };

    comment.is_approved = true;
    comment.updated_at = chrono::Utc::now();
    match state.store.save_comment(&comment).await {
        Ok(()) => (),
        Err(crate::store::StoreError::NotFound) => return Err(BlogError::CommentNotFound),
        Err(err) => return Err(err.into()),
    }

    tracing::info!("Approved comment {comment_id} on blog {}", comment.blog);
    Ok(response::done("Comment approved successfully"))
}
