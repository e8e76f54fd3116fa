use crate::blog::Blog;
use crate::routes::response::{self, Reply};
use crate::state::SharedState;
use crate::store::BlogFilter;
use axum::extract::State;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(super) struct BlogsData {
    blogs: Vec<Blog>,
}

/// Drafts included, newest first.
pub(super) async fn get(State(state): SharedState) -> Reply<BlogsData> {
    let mut blogs = state.store.find_blogs(BlogFilter::all()).await?;
    crate::blog::sort_newest_first(&mut blogs, |blog| blog.created_at);

    Ok(response::ok(BlogsData { blogs }))
}
