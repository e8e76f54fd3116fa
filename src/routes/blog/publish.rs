use crate::error::BlogError;
use crate::routes::response::{self, Reply};
use crate::routes::{required, IdRequest};
use crate::state::SharedState;
use crate::store::StoreError;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::Json;

pub(super) async fn post(
    State(state): SharedState,
    body: Result<Json<IdRequest>, JsonRejection>,
) -> Reply {
    let Json(request) = body?;
    let Some(blog_id) = required(request.id) else {
        return Err(BlogError::MissingFields);
    };

    let Some(mut blog) = state.store.find_blog(&blog_id).await? else {
        return Err(BlogError::BlogNotFound);
    };

    blog.is_published = !blog.is_published;
    blog.updated_at = chrono::Utc::now();

    match state.store.save_blog(&blog).await {
        Ok(()) => (),
        // deleted between the load and the save
        Err(StoreError::NotFound) => return Err(BlogError::BlogNotFound),
        Err(err) => return Err(err.into()),
    }

    tracing::info!("Blog {blog_id} is_published = {}", blog.is_published);
    Ok(response::done("Blog status updated"))
}
