use crate::blog::Blog;
use crate::routes::response::{self, Reply};
use crate::state::SharedState;
use crate::store::{BlogFilter, CommentFilter};
use axum::extract::State;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DashboardData {
    dashboard_data: Dashboard,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Dashboard {
    blogs: usize,
    comments: usize,
    drafts: usize,
    recent_blogs: Vec<Blog>,
}

pub(super) async fn get(State(state): SharedState) -> Reply<DashboardData> {
    let mut recent_blogs = state.store.find_blogs(BlogFilter::all()).await?;
    crate::blog::sort_newest_first(&mut recent_blogs, |blog| blog.created_at);
    recent_blogs.truncate(crate::blog::DASHBOARD_RECENT_BLOGS);

    let dashboard = Dashboard {
        blogs: state.store.count_blogs(BlogFilter::all()).await?,
        comments: state.store.count_comments(CommentFilter::all()).await?,
        drafts: state.store.count_blogs(BlogFilter::published(false)).await?,
        recent_blogs,
    };

    Ok(response::ok(DashboardData {
        dashboard_data: dashboard,
    }))
}
