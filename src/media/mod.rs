//! Image hosting for blog cover images.
//!
//! An upload hands back a [`StoredFile`]; display URLs are derived from its
//! `file_path` afterwards with [`MediaService::url`], which only builds a URL
//! and never uploads anything again.

use async_trait::async_trait;
use axum::body::Bytes;
use std::path::PathBuf;
use thiserror::Error;

pub mod imagekit;
pub mod local;

pub use imagekit::ImageKit;
pub use local::LocalMedia;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("image upload rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("image service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid file name {0:?}")]
    InvalidFileName(String),
}

#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    /// Path of the file inside the media service, always starting with `/`.
    pub file_path: String,
    /// Untransformed URL of the file.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transformation {
    Quality(String),
    Format(String),
    Width(u32),
}

impl Transformation {
    pub fn parameter(&self) -> (&'static str, String) {
        match self {
            Transformation::Quality(quality) => ("quality", quality.clone()),
            Transformation::Format(format) => ("format", format.clone()),
            Transformation::Width(width) => ("width", width.to_string()),
        }
    }
}

/// Automatic compression, converted to webp, resized for display.
pub fn display_transformations() -> Vec<Transformation> {
    vec![
        Transformation::Quality("auto".to_string()),
        Transformation::Format("webp".to_string()),
        Transformation::Width(crate::blog::IMAGE_WIDTH),
    ]
}

#[async_trait]
pub trait MediaService: std::fmt::Debug + Send + Sync {
    async fn upload(&self, upload: ImageUpload, folder: &str) -> Result<StoredFile, MediaError>;

    fn url(&self, file_path: &str, transformations: &[Transformation]) -> String;

    /// Where a file served by this process lives on disk, if it does.
    fn local_path(&self, _file_path: &str) -> Option<PathBuf> {
        None
    }
}

/// Keeps the characters that are safe in both a path and a URL.
pub fn sanitize_file_name(file_name: &str) -> Result<String, MediaError> {
    let base_name = std::path::Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| MediaError::InvalidFileName(file_name.to_string()))?;

    // dumb filename length cap
    if base_name.len() > 100 {
        return Err(MediaError::InvalidFileName(file_name.to_string()));
    }

    Ok(base_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect())
}
