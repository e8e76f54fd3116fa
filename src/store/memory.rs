use super::{check_id, BlogFilter, BlogStore, CommentFilter, Result, StoreError};
use crate::blog::{Blog, Comment, NewBlog, NewComment};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Keeps every record in memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blogs: RwLock<Vec<Blog>>,
    comments: RwLock<Vec<Comment>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn create_blog(&self, blog: NewBlog) -> Result<Blog> {
        let blog = Blog::from_new(crate::blog::new_record_id(), blog);
        self.blogs.write().await.push(blog.clone());

        Ok(blog)
    }

    async fn find_blogs(&self, filter: BlogFilter) -> Result<Vec<Blog>> {
        Ok(self
            .blogs
            .read()
            .await
            .iter()
            .filter(|blog| filter.matches(blog))
            .cloned()
            .collect())
    }

    async fn find_blog(&self, id: &str) -> Result<Option<Blog>> {
        check_id(id)?;
        let blogs = self.blogs.read().await;

        Ok(blogs.iter().find(|blog| blog.id == id).cloned())
    }

    async fn save_blog(&self, blog: &Blog) -> Result<()> {
        check_id(&blog.id)?;
        let mut blogs = self.blogs.write().await;
        let Some(slot) = blogs.iter_mut().find(|it| it.id == blog.id) else {
            return Err(StoreError::NotFound);
        };

        *slot = blog.clone();
        Ok(())
    }

    async fn delete_blog(&self, id: &str) -> Result<Option<Blog>> {
        check_id(id)?;
        let mut blogs = self.blogs.write().await;
        let position = blogs.iter().position(|blog| blog.id == id);

        Ok(position.map(|position| blogs.remove(position)))
    }

    async fn create_comment(&self, comment: NewComment) -> Result<Comment> {
        check_id(&comment.blog)?;
        let comment = Comment::from_new(crate::blog::new_record_id(), comment);
        self.comments.write().await.push(comment.clone());

        Ok(comment)
    }

    async fn find_comments(&self, filter: CommentFilter) -> Result<Vec<Comment>> {
        filter.check()?;

        Ok(self
            .comments
            .read()
            .await
            .iter()
            .filter(|comment| filter.matches(comment))
            .cloned()
            .collect())
    }

    async fn find_comment(&self, id: &str) -> Result<Option<Comment>> {
        check_id(id)?;
        let comments = self.comments.read().await;

        Ok(comments.iter().find(|comment| comment.id == id).cloned())
    }

    async fn save_comment(&self, comment: &Comment) -> Result<()> {
        check_id(&comment.id)?;
        let mut comments = self.comments.write().await;
        let Some(slot) = comments.iter_mut().find(|it| it.id == comment.id) else {
            return Err(StoreError::NotFound);
        };

        *slot = comment.clone();
        Ok(())
    }

    async fn delete_comment(&self, id: &str) -> Result<Option<Comment>> {
        check_id(id)?;
        let mut comments = self.comments.write().await;
        let position = comments.iter().position(|comment| comment.id == id);

        Ok(position.map(|position| comments.remove(position)))
    }

    async fn delete_comments(&self, filter: CommentFilter) -> Result<usize> {
        filter.check()?;
        let mut comments = self.comments.write().await;
        let before = comments.len();
        comments.retain(|comment| !filter.matches(comment));

        Ok(before - comments.len())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;

    #[tokio::test]
    async fn blog_lifecycle() {
        crate::store::tests::blog_lifecycle(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn comment_lifecycle() {
        crate::store::tests::comment_lifecycle(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn rejects_malformed_ids() {
        crate::store::tests::rejects_malformed_ids(&MemoryStore::new()).await;
    }
}
