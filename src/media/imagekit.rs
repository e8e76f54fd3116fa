use super::{ImageUpload, MediaError, MediaService, StoredFile, Transformation};
use async_trait::async_trait;
use serde::Deserialize;

const UPLOAD_URL: &str = "https://upload.imagekit.io/api/v1/files/upload";

/// ImageKit.io backend. Uploads authenticate with the account's private key;
/// transformations are encoded in the URL path (`/tr:q-auto:f-webp:w-1280/...`).
#[derive(Clone)]
pub struct ImageKit {
    client: reqwest::Client,
    private_key: String,
    url_endpoint: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    file_path: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

impl ImageKit {
    pub fn new(private_key: String, url_endpoint: String) -> ImageKit {
        ImageKit {
            client: reqwest::Client::new(),
            private_key,
            url_endpoint: url_endpoint.trim_end_matches('/').to_string(),
        }
    }
}

impl std::fmt::Debug for ImageKit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageKit")
            .field("url_endpoint", &self.url_endpoint)
            .finish_non_exhaustive()
    }
}

fn transformation_step(transformation: &Transformation) -> String {
    match transformation {
        Transformation::Quality(quality) => format!("q-{quality}"),
        Transformation::Format(format) => format!("f-{format}"),
        Transformation::Width(width) => format!("w-{width}"),
    }
}

#[async_trait]
impl MediaService for ImageKit {
    async fn upload(&self, upload: ImageUpload, folder: &str) -> Result<StoredFile, MediaError> {
        let file_name = super::sanitize_file_name(&upload.file_name)?;

        let mut file = reqwest::multipart::Part::bytes(upload.bytes.to_vec()).file_name(file_name.clone());
        if let Some(content_type) = upload.content_type.as_deref() {
            file = file.mime_str(content_type)?;
        }

        let form = reqwest::multipart::Form::new()
            .part("file", file)
            .text("fileName", file_name)
            .text("folder", folder.to_string())
            .text("useUniqueFileName", "true");

        let response = self
            .client
            .post(UPLOAD_URL)
            .basic_auth(&self.private_key, Some(""))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) => body.message,
                Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
            };
            return Err(MediaError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let uploaded = response.json::<UploadResponse>().await?;
        tracing::info!("Uploaded image {} to ImageKit", uploaded.file_path);

        Ok(StoredFile {
            file_path: uploaded.file_path,
            url: uploaded.url,
        })
    }

    fn url(&self, file_path: &str, transformations: &[Transformation]) -> String {
        let file_path = file_path.trim_start_matches('/');
        if transformations.is_empty() {
            return format!("{}/{file_path}", self.url_endpoint);
        }

        let chain = transformations
            .iter()
            .map(transformation_step)
            .collect::<Vec<_>>()
            .join(":");

        format!("{}/tr:{chain}/{file_path}", self.url_endpoint)
    }
}
