use crate::blog::{Blog, NewBlog};
use crate::error::BlogError;
use crate::media::ImageUpload;
use crate::routes::required;
use crate::routes::response::{self, Reply};
use crate::state::SharedState;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use serde::{Deserialize, Serialize};

/// JSON carried in the `blog` form field.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BlogFields {
    title: Option<String>,
    sub_title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    #[serde(default)]
    is_published: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct BlogData {
    blog: Blog,
}

pub(super) async fn post(
    State(state): SharedState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Reply<BlogData> {
    let mut multipart = multipart?;
    let mut fields = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| BlogError::InvalidRequest(err.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "blog" => {
                let text = field
                    .text()
                    .await
                    .map_err(|err| BlogError::InvalidRequest(err.to_string()))?;
                fields = Some(
                    serde_json::from_str::<BlogFields>(&text)
                        .map_err(|err| BlogError::InvalidRequest(err.to_string()))?,
                );
            }
            "image" => {
                let file_name = field.file_name().unwrap_or("image").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| BlogError::InvalidRequest(err.to_string()))?;

                if !bytes.is_empty() {
                    image = Some(ImageUpload {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
            }
            _ => (),
        }
    }

    let fields = fields.unwrap_or_default();
    let (Some(title), Some(description), Some(category), Some(image)) = (
        required(fields.title),
        required(fields.description),
        required(fields.category),
        image,
    ) else {
        return Err(BlogError::MissingFields);
    };

    let stored = state
        .media
        .upload(image, crate::blog::IMAGE_FOLDER)
        .await?;
    let image = state
        .media
        .url(&stored.file_path, &crate::media::display_transformations());

    let blog = state
        .store
        .create_blog(NewBlog {
            title,
            sub_title: required(fields.sub_title),
            description,
            category,
            image,
            is_published: fields.is_published,
        })
        .await?;

    tracing::info!("Added blog {} ({:?})", blog.id, blog.title);
    Ok(response::ok_with_message("Blog added successfully", BlogData { blog }))
}
