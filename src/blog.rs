use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

pub type BlogID = String;
pub type CommentID = String;
pub type SessionID = String;

pub const RECORD_ID_BYTES: usize = 12;
pub const SESSION_ID_BYTES: usize = 32;

pub const SESSION_TTL: std::time::Duration = std::time::Duration::from_secs(60 * 60 * 24);

/// Folder every blog cover image is uploaded into.
pub const IMAGE_FOLDER: &str = "/blogs";
pub const IMAGE_WIDTH: u32 = 1280;
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

pub const GENERATE_PROMPT_SUFFIX: &str =
    " Generate a blog content for this topic in simple text format";

pub const DASHBOARD_RECENT_BLOGS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(rename = "_id")]
    pub id: BlogID,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_title: Option<String>,
    pub description: String,
    pub category: String,
    pub image: String,
    #[serde(default)]
    pub is_published: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: CommentID,
    pub blog: BlogID,
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub is_approved: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Fields of a blog before the store assigns it an id and timestamps.
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub sub_title: Option<String>,
    pub description: String,
    pub category: String,
    pub image: String,
    pub is_published: bool,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub blog: BlogID,
    pub name: String,
    pub content: String,
}

impl Blog {
    pub fn from_new(id: BlogID, new: NewBlog) -> Blog {
        let now = chrono::Utc::now();
        Blog {
            id,
            title: new.title,
            sub_title: new.sub_title,
            description: new.description,
            category: new.category,
            image: new.image,
            is_published: new.is_published,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Comment {
    // comments always start out waiting for moderation
    pub fn from_new(id: CommentID, new: NewComment) -> Comment {
        let now = chrono::Utc::now();
        Comment {
            id,
            blog: new.blog,
            name: new.name,
            content: new.content,
            is_approved: false,
            created_at: now,
            updated_at: now,
        }
    }
}

pub fn get_random_hex_string<const LEN: usize>() -> String {
    let mut bytes = [0u8; LEN];
    rand_chacha::ChaCha20Rng::from_entropy().fill_bytes(&mut bytes);

    bytes.iter().fold(String::new(), |mut output, b| {
        let _ = write!(output, "{b:02x}");
        output
    })
}

pub fn new_record_id() -> String {
    get_random_hex_string::<RECORD_ID_BYTES>()
}

/// Whether `id` has the shape of a record id (24 hex characters).
pub fn is_record_id(id: &str) -> bool {
    static RECORD_ID_PATTERN: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();

    let pattern = RECORD_ID_PATTERN.get_or_init(|| {
        regex::Regex::new(&format!("^[0-9a-fA-F]{{{}}}$", RECORD_ID_BYTES * 2))
            .expect("constant pattern should parse")
    });

    pattern.is_match(id)
}

/// Route parameters a browser client sends when it has no id to give.
pub fn is_placeholder_id(id: &str) -> bool {
    id.is_empty() || id == "undefined" || id == "null"
}

/// Newest first, the order every admin listing uses.
pub fn sort_newest_first<T>(records: &mut [T], created_at: impl Fn(&T) -> chrono::DateTime<chrono::Utc>) {
    records.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_record_ids() {
        let id = new_record_id();
        assert_eq!(id.len(), 24);
        assert!(is_record_id(&id));
        assert_ne!(id, new_record_id());
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(!is_record_id("abc"));
        assert!(!is_record_id("zzzzzzzzzzzzzzzzzzzzzzzz"));
        assert!(!is_record_id("0123456789abcdef012345678"));
        assert!(is_record_id("0123456789ABCDEF01234567"));
    }

    #[test]
    fn placeholder_ids() {
        assert!(is_placeholder_id(""));
        assert!(is_placeholder_id("undefined"));
        assert!(is_placeholder_id("null"));
        assert!(!is_placeholder_id("0123456789abcdef01234567"));
    }

    #[test]
    fn blog_serializes_camel_case() {
        let blog = Blog::from_new(
            new_record_id(),
            NewBlog {
                title: "T".into(),
                sub_title: None,
                description: "D".into(),
                category: "C".into(),
                image: "https://img/x.webp".into(),
                is_published: false,
            },
        );

        let value = serde_json::to_value(&blog).expect("blog should serialize");
        assert_eq!(value["_id"], blog.id.as_str());
        assert_eq!(value["isPublished"], false);
        assert!(value.get("subTitle").is_none());
        assert!(value.get("createdAt").is_some());
    }
}
