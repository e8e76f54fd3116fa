use crate::error::BlogError;
use crate::routes::response::{self, Reply};
use crate::routes::{required, IdRequest};
use crate::state::SharedState;
use crate::store::CommentFilter;
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

    state.store.delete_blog(&blog_id).await?;

    // not atomic with the delete above; a failure here leaves orphaned comments
    let removed = match state
        .store
        .delete_comments(CommentFilter::for_blog(blog_id.clone()))
        .await
    {
        Ok(removed) => removed,
        Err(err) => {
            tracing::error!("Blog {blog_id} deleted but its comments were not: {err}");
            return Err(err.into());
        }
    };

    tracing::info!("Deleted blog {blog_id} and {removed} comments");
    Ok(response::done("Blog deleted successfully"))
}
