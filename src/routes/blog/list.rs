use crate::blog::Blog;
use crate::error::BlogError;
use crate::routes::response::{self, Reply};
use crate::state::SharedState;
use crate::store::BlogFilter;
use axum::extract::{Path, State};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(super) struct BlogsData {
    blogs: Vec<Blog>,
}

#[derive(Debug, Serialize)]
pub(super) struct BlogData {
    blog: Blog,
}

pub(super) async fn all(State(state): SharedState) -> Reply<BlogsData> {
    let blogs = state.store.find_blogs(BlogFilter::published(true)).await?;

    Ok(response::ok(BlogsData { blogs }))
}

pub(super) async fn get(State(state): SharedState, Path(blog_id): Path<String>) -> Reply<BlogData> {
    if crate::blog::is_placeholder_id(&blog_id) {
        return Err(BlogError::InvalidBlogId);
    }

    match state.store.find_blog(&blog_id).await {
        Ok(Some(blog)) => Ok(response::ok(BlogData { blog })),
        Ok(None) => Err(BlogError::BlogNotFound),
        Err(err) => Err(BlogError::from_blog_lookup(err)),
    }
}
