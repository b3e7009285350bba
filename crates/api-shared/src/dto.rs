//! JSON bodies for the post endpoints.
//!
//! Field names and shapes match what existing front ends already send and expect:
//! posts are listed as flat objects, mutations answer with `{message}` (plus `id` on create),
//! and every failure answers with `{error}`.

use posts_core::{Post, PostFields};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// A listed post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostRes {
    pub id: String,
    pub title: String,
    /// `YYYY-MM-DD HH:mm:ss` in UTC, or empty when the post has no date.
    #[schema(example = "2023-01-01 10:00:00")]
    pub date: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub content: String,
}

impl From<Post> for PostRes {
    fn from(post: Post) -> Self {
        Self {
            date: post.date.to_string(),
            id: post.id,
            title: post.title,
            categories: post.categories,
            tags: post.tags,
            content: post.content,
        }
    }
}

/// Body of create and update requests.
///
/// `categories` and `tags` may be sent either as a JSON array or as one comma-joined string.
/// A missing or `null` title or content reads as empty and is rejected by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct SavePostReq {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub categories: Option<Vec<String>>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub tags: Option<Vec<String>>,
}

impl From<SavePostReq> for PostFields {
    fn from(req: SavePostReq) -> Self {
        PostFields {
            title: req.title.unwrap_or_default(),
            content: req.content.unwrap_or_default(),
            date: req.date,
            categories: req.categories,
            tags: req.tags,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrList {
    List(Vec<String>),
    Text(String),
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrList>::deserialize(deserializer)?;
    Ok(value.map(|value| match value {
        StringOrList::List(items) => items,
        StringOrList::Text(text) => text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    }))
}

/// `{message}` answer to a successful update or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

impl MessageRes {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{message, id}` answer to a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatePostRes {
    pub message: String,
    pub id: String,
}

/// `{error}` answer to any failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
