use super::{ImageUpload, MediaError, MediaService, StoredFile, Transformation};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

/// Stores images on local disk and lets the server hand them out under
/// `/media`. Transformations are only recorded as query parameters.
#[derive(Debug, Clone)]
pub struct LocalMedia {
    root: PathBuf,
    public_url: String,
}

impl LocalMedia {
    pub async fn open(root: impl Into<PathBuf>, public_url: &str) -> std::io::Result<LocalMedia> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;

        Ok(LocalMedia {
            root,
            public_url: public_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl MediaService for LocalMedia {
    async fn upload(&self, upload: ImageUpload, folder: &str) -> Result<StoredFile, MediaError> {
        let file_name = format!(
            "{}-{}",
            crate::blog::get_random_hex_string::<8>(),
            super::sanitize_file_name(&upload.file_name)?
        );
        let folder = folder.trim_matches('/');
        let file_path = format!("/{folder}/{file_name}");

        let Some(disk_path) = self.local_path(&file_path) else {
            return Err(MediaError::InvalidFileName(file_path));
        };
        if let Some(parent) = disk_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&disk_path, &upload.bytes).await?;
        tracing::info!("Stored image {file_path} ({} bytes)", upload.bytes.len());

        Ok(StoredFile {
            url: self.url(&file_path, &[]),
            file_path,
        })
    }

    fn url(&self, file_path: &str, transformations: &[Transformation]) -> String {
        let encoded_path = file_path
            .trim_start_matches('/')
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let url = format!("{}/media/{encoded_path}", self.public_url);

        if transformations.is_empty() {
            return url;
        }

        let query = transformations
            .iter()
            .map(|transformation| {
                let (key, value) = transformation.parameter();
                format!("{key}={}", urlencoding::encode(&value))
            })
            .collect::<Vec<_>>()
            .join("&");

        format!("{url}?{query}")
    }

    fn local_path(&self, file_path: &str) -> Option<PathBuf> {
        let relative = Path::new(file_path.trim_start_matches('/'));
        // only plain names, no `..` or absolute parts
        if relative.as_os_str().is_empty()
            || !relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)))
        {
            return None;
        }

        Some(self.root.join(relative))
    }
}
