//! Document store for blogs and comments.
//!
//! Handlers only ever talk to [`BlogStore`]; the concrete backend is picked in
//! `main` from configuration. Every lookup by id goes through [`check_id`] first
//! so a malformed id is reported as [`StoreError::InvalidIdentifier`] instead of
//! a plain miss.

use crate::blog::{Blog, BlogID, Comment, NewBlog, NewComment};
use async_trait::async_trait;
use thiserror::Error;

pub mod fs;
pub mod memory;

pub use fs::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("invalid identifier {0:?}")]
    InvalidIdentifier(String),

    #[error("store temporarily unavailable: {0}")]
    TransientFailure(String),

    #[error("store error: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::Interrupted
            | std::io::ErrorKind::WouldBlock
            | std::io::ErrorKind::TimedOut => StoreError::TransientFailure(err.to_string()),
            _ => StoreError::Unknown(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Unknown(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BlogFilter {
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    pub blog: Option<BlogID>,
    pub is_approved: Option<bool>,
}

impl BlogFilter {
    pub fn all() -> BlogFilter {
        BlogFilter::default()
    }

    pub fn published(is_published: bool) -> BlogFilter {
        BlogFilter {
            is_published: Some(is_published),
        }
    }

    pub fn matches(&self, blog: &Blog) -> bool {
        self.is_published
            .map_or(true, |is_published| blog.is_published == is_published)
    }
}

impl CommentFilter {
    pub fn all() -> CommentFilter {
        CommentFilter::default()
    }

    pub fn for_blog(blog: impl Into<BlogID>) -> CommentFilter {
        CommentFilter {
            blog: Some(blog.into()),
            is_approved: None,
        }
    }

    pub fn approved(mut self) -> CommentFilter {
        self.is_approved = Some(true);
        self
    }

    pub fn matches(&self, comment: &Comment) -> bool {
        self.blog.as_ref().map_or(true, |blog| comment.blog == *blog)
            && self
                .is_approved
                .map_or(true, |is_approved| comment.is_approved == is_approved)
    }

    /// Validates the blog reference, if the filter carries one.
    pub fn check(&self) -> Result<()> {
        match &self.blog {
            Some(blog) => check_id(blog),
            None => Ok(()),
        }
    }
}

pub fn check_id(id: &str) -> Result<()> {
    if crate::blog::is_record_id(id) {
        Ok(())
    } else {
        Err(StoreError::InvalidIdentifier(id.to_string()))
    }
}

#[async_trait]
pub trait BlogStore: std::fmt::Debug + Send + Sync {
    async fn create_blog(&self, blog: NewBlog) -> Result<Blog>;
    /// Matching blogs in insertion order.
    async fn find_blogs(&self, filter: BlogFilter) -> Result<Vec<Blog>>;
    async fn find_blog(&self, id: &str) -> Result<Option<Blog>>;
    /// Overwrites an existing blog. `NotFound` if it was deleted meanwhile.
    async fn save_blog(&self, blog: &Blog) -> Result<()>;
    async fn delete_blog(&self, id: &str) -> Result<Option<Blog>>;

    async fn create_comment(&self, comment: NewComment) -> Result<Comment>;
    /// Matching comments in insertion order.
    async fn find_comments(&self, filter: CommentFilter) -> Result<Vec<Comment>>;
    async fn find_comment(&self, id: &str) -> Result<Option<Comment>>;
    async fn save_comment(&self, comment: &Comment) -> Result<()>;
    async fn delete_comment(&self, id: &str) -> Result<Option<Comment>>;
    /// Returns how many comments were removed.
    async fn delete_comments(&self, filter: CommentFilter) -> Result<usize>;

    async fn count_blogs(&self, filter: BlogFilter) -> Result<usize> {
        Ok(self.find_blogs(filter).await?.len())
    }

    async fn count_comments(&self, filter: CommentFilter) -> Result<usize> {
        Ok(self.find_comments(filter).await?.len())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    //! Behaviour every backend has to share, run against each of them.

    use super::*;

    pub fn new_blog(title: &str, is_published: bool) -> NewBlog {
        NewBlog {
            title: title.to_string(),
            sub_title: None,
            description: "description".to_string(),
            category: "Technology".to_string(),
            image: "https://img.example/blogs/cover.webp".to_string(),
            is_published,
        }
    }

    pub fn new_comment(blog: &BlogID, name: &str) -> NewComment {
        NewComment {
            blog: blog.clone(),
            name: name.to_string(),
            content: format!("{name} says hi"),
        }
    }

    pub async fn blog_lifecycle(store: &dyn BlogStore) {
        let draft = store.create_blog(new_blog("draft", false)).await.unwrap();
        let live = store.create_blog(new_blog("live", true)).await.unwrap();

        let published = store.find_blogs(BlogFilter::published(true)).await.unwrap();
        assert_eq!(published, vec![live.clone()]);
        assert_eq!(store.count_blogs(BlogFilter::all()).await.unwrap(), 2);

        let mut found = store.find_blog(&draft.id).await.unwrap().unwrap();
        found.is_published = true;
        store.save_blog(&found).await.unwrap();
        assert!(store.find_blog(&draft.id).await.unwrap().unwrap().is_published);

        assert_eq!(store.delete_blog(&live.id).await.unwrap(), Some(live.clone()));
        assert_eq!(store.find_blog(&live.id).await.unwrap(), None);
        assert_eq!(store.delete_blog(&live.id).await.unwrap(), None);
        assert!(matches!(
            store.save_blog(&live).await,
            Err(StoreError::NotFound)
        ));
    }

    pub async fn comment_lifecycle(store: &dyn BlogStore) {
        let blog = store.create_blog(new_blog("post", true)).await.unwrap();
        let other = store.create_blog(new_blog("other", true)).await.unwrap();

        let first = store.create_comment(new_comment(&blog.id, "ann")).await.unwrap();
        store.create_comment(new_comment(&blog.id, "bob")).await.unwrap();
        store.create_comment(new_comment(&other.id, "cat")).await.unwrap();
        assert!(!first.is_approved);

        let approved = CommentFilter::for_blog(blog.id.clone()).approved();
        assert!(store.find_comments(approved.clone()).await.unwrap().is_empty());

        let mut found = store.find_comment(&first.id).await.unwrap().unwrap();
        found.is_approved = true;
        store.save_comment(&found).await.unwrap();
        assert_eq!(store.find_comments(approved).await.unwrap(), vec![found]);

        let removed = store
            .delete_comments(CommentFilter::for_blog(blog.id.clone()))
            .await
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.count_comments(CommentFilter::all()).await.unwrap(), 1);
    }

    pub async fn rejects_malformed_ids(store: &dyn BlogStore) {
        assert!(matches!(
            store.find_blog("not-an-id").await,
            Err(StoreError::InvalidIdentifier(_))
        ));
        assert!(matches!(
            store.delete_comment("42").await,
            Err(StoreError::InvalidIdentifier(_))
        ));
        assert!(matches!(
            store.find_comments(CommentFilter::for_blog("nope")).await,
            Err(StoreError::InvalidIdentifier(_))
        ));
        assert!(matches!(
            store.create_comment(new_comment(&"nope".to_string(), "ann")).await,
            Err(StoreError::InvalidIdentifier(_))
        ));
    }
}
