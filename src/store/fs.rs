use super::{check_id, BlogFilter, BlogStore, CommentFilter, Result, StoreError};
use crate::blog::{Blog, Comment, NewBlog, NewComment};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const BLOG_DIR: &str = "blog";
const COMMENT_DIR: &str = "comment";

/// One JSON file per record:
///
/// ```text
/// <root>/blog/<id>.json
/// <root>/comment/<id>.json
/// ```
///
/// Updates and deletes of existing records are serialized by `writes`; the
/// last save to a record wins.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    writes: Arc<tokio::sync::Mutex<()>>,
}

impl FileStore {
    /// Opens the store at `root`, creating its folders if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<FileStore> {
        let root = root.into();
        tokio::fs::create_dir_all(root.join(BLOG_DIR)).await?;
        tokio::fs::create_dir_all(root.join(COMMENT_DIR)).await?;

        Ok(FileStore {
            root,
            writes: Arc::new(tokio::sync::Mutex::new(())),
        })
    }

    fn record_path(&self, dir: &str, id: &str) -> PathBuf {
        self.root.join(dir).join(format!("{id}.json"))
    }

    async fn read_record<T: DeserializeOwned>(&self, dir: &str, id: &str) -> Result<Option<T>> {
        check_id(id)?;
        let path = self.record_path(dir, id);

        let file = match tokio::fs::read(&path).await {
            Ok(it) => it,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                tracing::error!("Error reading record {path:?}: {err}");
                return Err(err.into());
            }
        };

        Ok(Some(serde_json::from_slice(&file)?))
    }

    async fn write_record<T: Serialize>(&self, dir: &str, id: &str, record: &T) -> Result<()> {
        let path = self.record_path(dir, id);
        let staging = self.root.join(dir).join(format!(
            "{id}.{}.tmp",
            crate::blog::get_random_hex_string::<8>()
        ));

        tokio::fs::write(&staging, serde_json::to_vec(record)?).await?;
        if let Err(err) = tokio::fs::rename(&staging, &path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(err.into());
        }

        Ok(())
    }

    /// Overwrites a record that has to exist already.
    async fn replace_record<T: Serialize>(&self, dir: &str, id: &str, record: &T) -> Result<()> {
        check_id(id)?;
        let _writes = self.writes.lock().await;
        match tokio::fs::metadata(self.record_path(dir, id)).await {
            Ok(_) => self.write_record(dir, id, record).await,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound),
            Err(err) => Err(err.into()),
        }
    }

    async fn remove_record<T: DeserializeOwned>(&self, dir: &str, id: &str) -> Result<Option<T>> {
        let _writes = self.writes.lock().await;
        let Some(record) = self.read_record(dir, id).await? else {
            return Ok(None);
        };

        match tokio::fs::remove_file(self.record_path(dir, id)).await {
            Ok(()) => Ok(Some(record)),
            // lost a race with another delete
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn read_all<T: DeserializeOwned>(&self, dir: &str) -> Result<Vec<T>> {
        let mut entries = tokio::fs::read_dir(self.root.join(dir)).await?;
        let mut records = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !is_record_file(&path) {
                continue;
            }

            let file = match tokio::fs::read(&path).await {
                Ok(it) => it,
                // deleted between listing and reading
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
                Err(err) => {
                    tracing::error!("Error reading record {path:?}: {err}");
                    return Err(err.into());
                }
            };

            match serde_json::from_slice(&file) {
                Ok(record) => records.push(record),
                Err(err) => {
                    tracing::error!("Error deserializing record {path:?}: {err}");
                    return Err(err.into());
                }
            }
        }

        Ok(records)
    }
}

fn is_record_file(path: &Path) -> bool {
    path.extension().is_some_and(|extension| extension == "json")
}

#[async_trait]
impl BlogStore for FileStore {
    async fn create_blog(&self, blog: NewBlog) -> Result<Blog> {
        let blog = Blog::from_new(crate::blog::new_record_id(), blog);
        self.write_record(BLOG_DIR, &blog.id, &blog).await?;

        Ok(blog)
    }

    async fn find_blogs(&self, filter: BlogFilter) -> Result<Vec<Blog>> {
        let mut blogs = self
            .read_all::<Blog>(BLOG_DIR)
            .await?
            .into_iter()
            .filter(|blog| filter.matches(blog))
            .collect::<Vec<_>>();
        // directory listings have no order of their own
        blogs.sort_by_key(|blog| blog.created_at);

        Ok(blogs)
    }

    async fn find_blog(&self, id: &str) -> Result<Option<Blog>> {
        self.read_record(BLOG_DIR, id).await
    }

    async fn save_blog(&self, blog: &Blog) -> Result<()> {
        self.replace_record(BLOG_DIR, &blog.id, blog).await
    }

    async fn delete_blog(&self, id: &str) -> Result<Option<Blog>> {
        self.remove_record(BLOG_DIR, id).await
    }

    async fn create_comment(&self, comment: NewComment) -> Result<Comment> {
        check_id(&comment.blog)?;
        let comment = Comment::from_new(crate::blog::new_record_id(), comment);
        self.write_record(COMMENT_DIR, &comment.id, &comment).await?;

        Ok(comment)
    }

    async fn find_comments(&self, filter: CommentFilter) -> Result<Vec<Comment>> {
        filter.check()?;
        let mut comments = self
            .read_all::<Comment>(COMMENT_DIR)
            .await?
            .into_iter()
            .filter(|comment| filter.matches(comment))
            .collect::<Vec<_>>();
        comments.sort_by_key(|comment| comment.created_at);

        Ok(comments)
    }

    async fn find_comment(&self, id: &str) -> Result<Option<Comment>> {
        self.read_record(COMMENT_DIR, id).await
    }

    async fn save_comment(&self, comment: &Comment) -> Result<()> {
        self.replace_record(COMMENT_DIR, &comment.id, comment).await
    }

    async fn delete_comment(&self, id: &str) -> Result<Option<Comment>> {
        self.remove_record(COMMENT_DIR, id).await
    }

    async fn delete_comments(&self, filter: CommentFilter) -> Result<usize> {
        let mut removed = 0;
        for comment in self.find_comments(filter).await? {
            if self
                .remove_record::<Comment>(COMMENT_DIR, &comment.id)
                .await?
                .is_some()
            {
                removed += 1;
            }
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::FileStore;
    use crate::store::BlogStore;

    async fn open() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn blog_lifecycle() {
        let (_dir, store) = open().await;
        crate::store::tests::blog_lifecycle(&store).await;
    }

    #[tokio::test]
    async fn comment_lifecycle() {
        let (_dir, store) = open().await;
        crate::store::tests::comment_lifecycle(&store).await;
    }

    #[tokio::test]
    async fn rejects_malformed_ids() {
        let (_dir, store) = open().await;
        crate::store::tests::rejects_malformed_ids(&store).await;
    }

    #[tokio::test]
    async fn records_survive_reopening() {
        let (dir, store) = open().await;
        let blog = store
            .create_blog(crate::store::tests::new_blog("kept", true))
            .await
            .unwrap();
        drop(store);

        let reopened = FileStore::open(dir.path()).await.unwrap();
        assert_eq!(reopened.find_blog(&blog.id).await.unwrap(), Some(blog));
    }

    #[tokio::test]
    async fn concurrent_saves_of_one_blog_all_succeed() {
        let (dir, store) = open().await;
        let blog = store
            .create_blog(crate::store::tests::new_blog("busy", false))
            .await
            .unwrap();

        let saves = (0..64).map(|n| {
            let store = store.clone();
            let mut blog = blog.clone();
            blog.is_published = n % 2 == 0;
            tokio::spawn(async move { store.save_blog(&blog).await })
        });
        for save in saves.collect::<Vec<_>>() {
            save.await.unwrap().unwrap();
        }

        assert!(store.find_blog(&blog.id).await.unwrap().is_some());
        let mut entries = tokio::fs::read_dir(dir.path().join("blog")).await.unwrap();
        let mut files = 0;
        while let Some(entry) = entries.next_entry().await.unwrap() {
            assert_eq!(entry.path().extension().unwrap(), "json");
            files += 1;
        }
        assert_eq!(files, 1);
    }

    #[tokio::test]
    async fn save_after_delete_does_not_bring_a_blog_back() {
        let (_dir, store) = open().await;
        let blog = store
            .create_blog(crate::store::tests::new_blog("gone", true))
            .await
            .unwrap();

        let delete = {
            let store = store.clone();
            let id = blog.id.clone();
            tokio::spawn(async move { store.delete_blog(&id).await })
        };
        let save = {
            let store = store.clone();
            let blog = blog.clone();
            tokio::spawn(async move { store.save_blog(&blog).await })
        };
        assert!(delete.await.unwrap().unwrap().is_some());
        assert!(matches!(
            save.await.unwrap(),
            Ok(()) | Err(crate::store::StoreError::NotFound)
        ));
        assert_eq!(store.find_blog(&blog.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn ignores_stray_files() {
        let (dir, store) = open().await;
        tokio::fs::write(dir.path().join("blog").join("notes.txt"), b"hello")
            .await
            .unwrap();

        assert!(store
            .find_blogs(crate::store::BlogFilter::all())
            .await
            .unwrap()
            .is_empty());
    }
}
